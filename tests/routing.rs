//! Integration tests for route classification and target resolution.

use pixiv_forwarder::config::model::{Config, RouteToggles};
use pixiv_forwarder::forward::route::{classify, strip_mount_prefix, RouteClass, TargetDescriptor};

fn resolve(uri_path: &str, query: Option<&str>, routes: RouteToggles) -> Option<String> {
    let config = Config {
        routes,
        ..Config::default()
    };
    let (class, path) = classify(uri_path, &config.routes);
    class
        .host(&config.hosts)
        .map(|host| TargetDescriptor::new(host, path, query).url())
}

#[test]
fn default_routes_resolve_concrete_targets() {
    let routes = RouteToggles::default();

    assert_eq!(
        resolve("/image/foo/bar.jpg", Some("x=1"), routes).as_deref(),
        Some("https://i.pximg.net/foo/bar.jpg?x=1")
    );
    assert_eq!(
        resolve("/v1/user/detail", None, routes).as_deref(),
        Some("https://app-api.pixiv.net/v1/user/detail")
    );
    // OAuth is off by default, so its paths land on the API host unchanged
    assert_eq!(
        resolve("/auth/token", None, routes).as_deref(),
        Some("https://app-api.pixiv.net/auth/token")
    );
}

#[test]
fn priority_order_oauth_then_image_then_api() {
    let all_on = RouteToggles {
        api: true,
        image: true,
        oauth: true,
    };

    assert_eq!(classify("/oauth/token", &all_on).0, RouteClass::OAuth);
    assert_eq!(classify("/image/x.png", &all_on).0, RouteClass::Image);
    assert_eq!(classify("/v1/illust/ranking", &all_on).0, RouteClass::Api);
    assert_eq!(
        resolve("/auth/token", None, all_on).as_deref(),
        Some("https://oauth.secure.pixiv.net/token")
    );
}

#[test]
fn disabled_routes_never_resolve_a_host() {
    let all_off = RouteToggles {
        api: false,
        image: false,
        oauth: false,
    };

    for path in ["/oauth/token", "/auth/token", "/image/a.png", "/v1/user/detail"] {
        let (class, _) = classify(path, &all_off);
        assert!(matches!(class, RouteClass::Disabled { .. }), "{path}");
        assert!(resolve(path, None, all_off).is_none(), "{path}");
    }
}

#[test]
fn image_only_deployment_rejects_api_traffic() {
    let image_only = RouteToggles {
        api: false,
        image: true,
        oauth: false,
    };

    assert!(resolve("/image/a.png", None, image_only).is_some());
    assert_eq!(
        classify("/v1/user/detail", &image_only).0,
        RouteClass::Disabled { flag: "api" }
    );
}

#[test]
fn mount_prefix_then_classify() {
    let path = strip_mount_prefix("/api/image/a/b.png", "/api");
    let (class, forwarded) = classify(path, &RouteToggles::default());
    assert_eq!(class, RouteClass::Image);
    assert_eq!(forwarded, "/a/b.png");
}
