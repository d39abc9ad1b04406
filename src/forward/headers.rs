//! Header construction for both directions of the forward.
//!
//! [`build_outbound_headers`] copies the caller's headers (every value of
//! multi-value headers included), strips hop-by-hop headers, and then
//! overrides the client-identifying headers with the configured client
//! profile. [`apply_cors`] decorates responses with the permissive
//! cross-origin headers returned to browsers.

use std::sync::LazyLock;

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_LENGTH, HOST, REFERER, USER_AGENT,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::config::model::Config;

pub static APP_OS: HeaderName = HeaderName::from_static("app-os");
pub static APP_OS_VERSION: HeaderName = HeaderName::from_static("app-os-version");
pub static APP_VERSION: HeaderName = HeaderName::from_static("app-version");

pub const CORS_ALLOW_METHODS: &str = "GET, POST, DELETE, OPTIONS";

static HOP_BY_HOP: LazyLock<Vec<HeaderName>> = LazyLock::new(|| {
    [
        "connection",
        "keep-alive",
        "proxy-connection",
        "proxy-authenticate",
        "proxy-authorization",
        "transfer-encoding",
        "te",
        "trailer",
        "upgrade",
    ]
    .iter()
    .filter_map(|name| name.parse::<HeaderName>().ok())
    .collect()
});

pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
}

/// Build the header set sent upstream.
///
/// `forwards_body` is false for GET/HEAD, whose body is dropped; the
/// caller's `content-length` is removed with it so the framing stays
/// consistent.
#[must_use]
pub fn build_outbound_headers(
    original: &HeaderMap,
    target_host: &str,
    config: &Config,
    forwards_body: bool,
) -> HeaderMap {
    let mut headers = original.clone();
    strip_hop_by_hop(&mut headers);
    if !forwards_body {
        headers.remove(CONTENT_LENGTH);
    }

    let referer = config.referer();
    let overrides: [(HeaderName, &str); 6] = [
        (HOST, target_host),
        (REFERER, referer.as_str()),
        (USER_AGENT, config.client.user_agent.as_str()),
        (APP_OS.clone(), config.client.app_os.as_str()),
        (APP_OS_VERSION.clone(), config.client.app_os_version.as_str()),
        (APP_VERSION.clone(), config.client.app_version.as_str()),
    ];
    for (name, value) in overrides {
        match HeaderValue::from_str(value) {
            Ok(val) => {
                headers.insert(name, val);
            }
            Err(_) => {
                // Config validation rejects these; drop the caller's value regardless.
                headers.remove(&name);
                tracing::warn!(header = %name, "invalid override value, header dropped");
            }
        }
    }

    headers
}

/// Set the cross-origin headers, replacing any the upstream sent.
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
}
