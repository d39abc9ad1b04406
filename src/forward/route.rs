//! Path-prefix route classification.
//!
//! [`classify`] maps an inbound path to exactly one [`RouteClass`] and the
//! path to forward. Prefixes are checked in a fixed priority order (OAuth,
//! then image, then the API fallback); a prefix whose route is disabled
//! falls through to the next rule. [`strip_mount_prefix`] removes the
//! leading segment an adapter is mounted under.

use std::fmt;

use crate::config::model::{RouteToggles, UpstreamHosts};

const OAUTH_PREFIXES: [&str; 2] = ["/oauth", "/auth"];
const IMAGE_PREFIX: &str = "/image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Api,
    Image,
    OAuth,
    /// Nothing enabled matched. `flag` names the route the path asked for.
    Disabled { flag: &'static str },
}

impl RouteClass {
    /// Upstream host for this class, `None` when disabled.
    #[must_use]
    pub fn host(self, hosts: &UpstreamHosts) -> Option<&str> {
        match self {
            Self::Api => Some(&hosts.api),
            Self::Image => Some(&hosts.image),
            Self::OAuth => Some(&hosts.oauth),
            Self::Disabled { .. } => None,
        }
    }

    /// Name of the config flag gating this class.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Image => "image",
            Self::OAuth => "oauth",
            Self::Disabled { flag } => flag,
        }
    }
}

impl fmt::Display for RouteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api => f.write_str("api"),
            Self::Image => f.write_str("image"),
            Self::OAuth => f.write_str("oauth"),
            Self::Disabled { flag } => write!(f, "disabled({flag})"),
        }
    }
}

/// Strip `prefix` from the front of `path` when it is followed by `/`.
/// Returns `None` when the path does not start with that segment.
fn strip_segment<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix).filter(|rest| rest.starts_with('/'))
}

#[must_use]
pub fn classify<'a>(path: &'a str, routes: &RouteToggles) -> (RouteClass, &'a str) {
    let oauth_match = OAUTH_PREFIXES
        .iter()
        .find_map(|prefix| strip_segment(path, prefix));
    if routes.oauth {
        if let Some(rest) = oauth_match {
            return (RouteClass::OAuth, rest);
        }
    }

    let image_match = strip_segment(path, IMAGE_PREFIX);
    if routes.image {
        if let Some(rest) = image_match {
            return (RouteClass::Image, rest);
        }
    }

    if routes.api {
        return (RouteClass::Api, path);
    }

    let flag = if oauth_match.is_some() {
        "oauth"
    } else if image_match.is_some() {
        "image"
    } else {
        "api"
    };
    (RouteClass::Disabled { flag }, path)
}

/// Remove the mount prefix an adapter is served under. Only a whole
/// leading segment is removed: `/api/x` becomes `/x`, `/api` becomes `/`,
/// and `/apix` is left alone.
#[must_use]
pub fn strip_mount_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    match path.strip_prefix(prefix) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Resolved upstream call parameters for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub host: String,
    pub path: String,
    pub query: Option<String>,
}

impl TargetDescriptor {
    #[must_use]
    pub fn new(host: &str, path: &str, query: Option<&str>) -> Self {
        Self {
            host: host.to_string(),
            path: path.to_string(),
            query: query.filter(|q| !q.is_empty()).map(String::from),
        }
    }

    #[must_use]
    pub fn url(&self) -> String {
        match &self.query {
            Some(query) => format!("https://{}{}?{}", self.host, self.path, query),
            None => format!("https://{}{}", self.host, self.path),
        }
    }
}
