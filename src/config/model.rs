//! Serde data structures for the forwarder configuration.
//!
//! Contains [`Config`] (the root), [`RouteToggles`], [`UpstreamHosts`] and
//! [`ClientProfile`]. Every field has a compiled-in default so the
//! forwarder runs without any config file; a file only overrides what it
//! names. All types use `deny_unknown_fields` for strict parsing.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_HOST: &str = "app-api.pixiv.net";
pub const DEFAULT_IMAGE_HOST: &str = "i.pximg.net";
pub const DEFAULT_OAUTH_HOST: &str = "oauth.secure.pixiv.net";

pub const DEFAULT_USER_AGENT: &str = "PixivIOSApp/7.13.3 (iOS 14.6; iPhone13,2)";
pub const DEFAULT_APP_OS: &str = "ios";
pub const DEFAULT_APP_OS_VERSION: &str = "14.6";
pub const DEFAULT_APP_VERSION: &str = "7.13.3";

pub const DEFAULT_EDGE_PREFIX: &str = "/api";
pub const DEFAULT_HEALTH_PATH: &str = "/_health";

const fn default_true() -> bool {
    true
}

fn default_edge_prefix() -> String {
    DEFAULT_EDGE_PREFIX.to_string()
}

fn default_health_path() -> String {
    DEFAULT_HEALTH_PATH.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub routes: RouteToggles,

    #[serde(default)]
    pub hosts: UpstreamHosts,

    #[serde(default)]
    pub client: ClientProfile,

    /// Leading path segment removed by the edge runtime adapter.
    #[serde(default = "default_edge_prefix")]
    pub edge_prefix: String,

    #[serde(default = "default_health_path")]
    pub health_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routes: RouteToggles::default(),
            hosts: UpstreamHosts::default(),
            client: ClientProfile::default(),
            edge_prefix: default_edge_prefix(),
            health_path: default_health_path(),
        }
    }
}

impl Config {
    /// `Referer` presented upstream: the API host's root URL.
    #[must_use]
    pub fn referer(&self) -> String {
        format!("https://{}/", self.hosts.api)
    }
}

/// Per-route enable flags. OAuth is off by default: token exchange has to
/// go direct, the OAuth host rejects forwarded calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteToggles {
    #[serde(default = "default_true")]
    pub api: bool,

    #[serde(default = "default_true")]
    pub image: bool,

    #[serde(default)]
    pub oauth: bool,
}

impl Default for RouteToggles {
    fn default() -> Self {
        Self {
            api: true,
            image: true,
            oauth: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamHosts {
    #[serde(default = "UpstreamHosts::default_api")]
    pub api: String,

    #[serde(default = "UpstreamHosts::default_image")]
    pub image: String,

    #[serde(default = "UpstreamHosts::default_oauth")]
    pub oauth: String,
}

impl UpstreamHosts {
    fn default_api() -> String {
        DEFAULT_API_HOST.to_string()
    }

    fn default_image() -> String {
        DEFAULT_IMAGE_HOST.to_string()
    }

    fn default_oauth() -> String {
        DEFAULT_OAUTH_HOST.to_string()
    }
}

impl Default for UpstreamHosts {
    fn default() -> Self {
        Self {
            api: Self::default_api(),
            image: Self::default_image(),
            oauth: Self::default_oauth(),
        }
    }
}

/// Client signature presented to the upstream in place of the caller's.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientProfile {
    #[serde(default = "ClientProfile::default_user_agent")]
    pub user_agent: String,

    #[serde(default = "ClientProfile::default_app_os")]
    pub app_os: String,

    #[serde(default = "ClientProfile::default_app_os_version")]
    pub app_os_version: String,

    #[serde(default = "ClientProfile::default_app_version")]
    pub app_version: String,
}

impl ClientProfile {
    fn default_user_agent() -> String {
        DEFAULT_USER_AGENT.to_string()
    }

    fn default_app_os() -> String {
        DEFAULT_APP_OS.to_string()
    }

    fn default_app_os_version() -> String {
        DEFAULT_APP_OS_VERSION.to_string()
    }

    fn default_app_version() -> String {
        DEFAULT_APP_VERSION.to_string()
    }
}

impl Default for ClientProfile {
    fn default() -> Self {
        Self {
            user_agent: Self::default_user_agent(),
            app_os: Self::default_app_os(),
            app_os_version: Self::default_app_os_version(),
            app_version: Self::default_app_version(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_compiled_in_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.routes.api);
        assert!(config.routes.image);
        assert!(!config.routes.oauth);
        assert_eq!(config.hosts.image, "i.pximg.net");
        assert_eq!(config.edge_prefix, "/api");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"routes": {"oauth": true}, "hosts": {"api": "api.test"}}"#)
                .unwrap();
        assert!(config.routes.oauth);
        assert!(config.routes.api);
        assert_eq!(config.hosts.api, "api.test");
        assert_eq!(config.hosts.oauth, DEFAULT_OAUTH_HOST);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<Config>(r#"{"routes": {"video": true}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn referer_points_at_api_root() {
        assert_eq!(Config::default().referer(), "https://app-api.pixiv.net/");
    }
}
