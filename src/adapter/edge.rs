//! Prefix-mounted runtime.
//!
//! Edge deployments route the forwarder under a fixed leading segment
//! (`edge_prefix`, `/api` by default). That segment is removed here so the
//! forwarder classifies `/api/image/...` exactly like `/image/...`. Paths
//! outside the prefix are forwarded unchanged.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::uri::PathAndQuery;
use axum::http::Uri;
use axum::response::Response;

use crate::forward::route::strip_mount_prefix;
use crate::server::AppState;

pub async fn handle(State(state): State<Arc<AppState>>, mut request: Request) -> Response {
    let prefix = &state.forwarder.config().edge_prefix;
    if let Some(uri) = unmount(request.uri(), prefix) {
        *request.uri_mut() = uri;
    }
    state.forwarder.handle(request).await
}

/// The request URI with `prefix` removed, or `None` when nothing changes.
fn unmount(uri: &Uri, prefix: &str) -> Option<Uri> {
    let path = uri.path();
    let stripped = strip_mount_prefix(path, prefix);
    if stripped.len() == path.len() {
        return None;
    }

    let path_and_query = match uri.query() {
        Some(query) => format!("{stripped}?{query}"),
        None => stripped.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = match path_and_query.parse::<PathAndQuery>() {
        Ok(pq) => Some(pq),
        Err(e) => {
            tracing::debug!(error = %e, "could not rebuild URI without mount prefix");
            return None;
        }
    };
    Uri::from_parts(parts).ok()
}
