//! Root-mounted runtime: the request reaches the forwarder as served.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::response::Response;

use crate::server::AppState;

pub async fn handle(State(state): State<Arc<AppState>>, request: Request) -> Response {
    state.forwarder.handle(request).await
}
