//! Integration tests for the served runtimes, health endpoint, and graceful shutdown.
//!
//! The upstream is replaced by a recording double so the tests exercise the
//! full HTTP path (axum, adapters, forwarder) without leaving the machine.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, Response, StatusCode};
use http_body_util::BodyExt;

use pixiv_forwarder::adapter::Runtime;
use pixiv_forwarder::config::model::{Config, RouteToggles};
use pixiv_forwarder::forward::response::ErrorBody;
use pixiv_forwarder::forward::{Forwarder, Upstream, UpstreamError};
use pixiv_forwarder::health::HealthResponse;
use pixiv_forwarder::server::{self, AppState};

#[derive(Debug, Clone)]
struct Seen {
    method: String,
    uri: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

#[derive(Default)]
struct RecordingUpstream {
    seen: Mutex<Vec<Seen>>,
    refuse: bool,
}

impl RecordingUpstream {
    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Upstream for RecordingUpstream {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, UpstreamError> {
        let (parts, body) = request.into_parts();
        let body = body.collect().await.unwrap().to_bytes().to_vec();
        self.seen.lock().unwrap().push(Seen {
            method: parts.method.to_string(),
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
        });
        if self.refuse {
            return Err(UpstreamError::new(
                "client error (Connect): tcp connect error: Connection refused (os error 111)",
            ));
        }
        Ok(Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "application/json")
            .header("x-upstream", "pixiv")
            .body(Body::from(r#"{"user":{"id":1}}"#))
            .unwrap())
    }
}

async fn start(
    runtime: Runtime,
    config: Config,
    upstream: Arc<RecordingUpstream>,
) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let state = Arc::new(AppState {
        forwarder: Forwarder::new(Arc::new(config), upstream),
        runtime,
        config_source: "test".into(),
        start_time: Instant::now(),
    });

    let router = server::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

#[tokio::test]
async fn worker_forwards_image_request() {
    let upstream = Arc::new(RecordingUpstream::default());
    let (addr, shutdown) = start(Runtime::Worker, Config::default(), upstream.clone()).await;

    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/image/foo/bar.jpg?x=1"))
        .header("user-agent", "Mozilla/5.0")
        .header("app-version", "1.0.0")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    assert_eq!(
        resp.headers()["access-control-allow-methods"],
        "GET, POST, DELETE, OPTIONS"
    );
    assert_eq!(resp.headers()["x-upstream"], "pixiv");
    assert_eq!(resp.text().await.unwrap(), r#"{"user":{"id":1}}"#);

    let seen = upstream.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].uri, "https://i.pximg.net/foo/bar.jpg?x=1");
    assert_eq!(seen[0].headers["host"], "i.pximg.net");
    assert_eq!(seen[0].headers["referer"], "https://app-api.pixiv.net/");
    assert_eq!(
        seen[0].headers["user-agent"],
        "PixivIOSApp/7.13.3 (iOS 14.6; iPhone13,2)"
    );
    assert_eq!(seen[0].headers["app-version"], "7.13.3");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn edge_strips_mount_prefix() {
    let upstream = Arc::new(RecordingUpstream::default());
    let (addr, shutdown) = start(Runtime::Edge, Config::default(), upstream.clone()).await;

    let client = reqwest::Client::new();
    client
        .get(format!("http://{addr}/api/v1/user/detail?user_id=11"))
        .send()
        .await
        .unwrap();
    client
        .get(format!("http://{addr}/api/image/c/img.png"))
        .send()
        .await
        .unwrap();

    let seen = upstream.seen();
    assert_eq!(
        seen[0].uri,
        "https://app-api.pixiv.net/v1/user/detail?user_id=11"
    );
    assert_eq!(seen[1].uri, "https://i.pximg.net/c/img.png");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn post_body_is_streamed_through() {
    let upstream = Arc::new(RecordingUpstream::default());
    let (addr, shutdown) = start(Runtime::Worker, Config::default(), upstream.clone()).await;

    reqwest::Client::new()
        .post(format!("http://{addr}/v2/illust/bookmark/add"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("illust_id=42&restrict=public")
        .send()
        .await
        .unwrap();

    let seen = upstream.seen();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].body, b"illust_id=42&restrict=public");
    assert_eq!(
        seen[0].headers["content-type"],
        "application/x-www-form-urlencoded"
    );

    let _ = shutdown.send(());
}

#[tokio::test]
async fn preflight_is_answered_on_any_path() {
    let upstream = Arc::new(RecordingUpstream::default());
    let (addr, shutdown) = start(Runtime::Worker, Config::default(), upstream.clone()).await;

    let client = reqwest::Client::new();
    for path in ["/v1/illust/detail", "/image/x.jpg", "/_health"] {
        let resp = client
            .request(reqwest::Method::OPTIONS, format!("http://{addr}{path}"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers()["access-control-allow-headers"], "*");
        assert!(resp.bytes().await.unwrap().is_empty());
    }
    assert!(upstream.seen().is_empty());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn oauth_with_everything_else_disabled_is_403() {
    let upstream = Arc::new(RecordingUpstream::default());
    let config = Config {
        routes: RouteToggles {
            api: false,
            image: true,
            oauth: false,
        },
        ..Config::default()
    };
    let (addr, shutdown) = start(Runtime::Worker, config, upstream.clone()).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/oauth/token"))
        .body("grant_type=refresh_token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    assert_eq!(resp.headers()["content-type"], "application/json");
    let body: ErrorBody = resp.json().await.unwrap();
    assert_eq!(body.error, "Service not enabled");
    assert!(body.hint.is_some());
    assert!(upstream.seen().is_empty());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn connection_error_is_502() {
    let upstream = Arc::new(RecordingUpstream {
        refuse: true,
        ..RecordingUpstream::default()
    });
    let (addr, shutdown) = start(Runtime::Worker, Config::default(), upstream).await;

    let resp = reqwest::get(format!("http://{addr}/v1/user/detail"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);
    let body: ErrorBody = resp.json().await.unwrap();
    assert!(body.error.contains("Connection refused"));
    assert_eq!(body.target.as_deref(), Some("app-api.pixiv.net"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn health_reports_routes_and_counters() {
    let upstream = Arc::new(RecordingUpstream::default());
    let (addr, shutdown) = start(Runtime::Edge, Config::default(), upstream).await;

    reqwest::get(format!("http://{addr}/api/v1/user/detail"))
        .await
        .unwrap();

    let health: HealthResponse = reqwest::get(format!("http://{addr}/_health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(health.runtime, Runtime::Edge);
    assert_eq!(health.config_source, "test");
    assert_eq!(health.routes.len(), 3);
    assert!(health.routes.iter().any(|r| r.name == "oauth" && !r.enabled));
    assert_eq!(health.stats.requests_forwarded, 1);
    assert_eq!(health.stats.requests_failed, 0);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn graceful_shutdown_works() {
    let upstream = Arc::new(RecordingUpstream::default());
    let (addr, shutdown) = start(Runtime::Worker, Config::default(), upstream).await;

    let url = format!("http://{addr}/_health");
    assert!(reqwest::get(&url).await.is_ok());

    let _ = shutdown.send(());

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let result = reqwest::get(&url).await;
    assert!(result.is_err());
}
