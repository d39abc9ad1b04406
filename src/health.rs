//! Health endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload containing the server
//! version, build, uptime, selected runtime, route table and cumulative
//! request statistics.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::adapter::Runtime;
use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub build: String,
    pub uptime_seconds: u64,
    pub runtime: Runtime,
    pub config_source: String,
    pub routes: Vec<RouteHealth>,
    pub stats: StatsResponse,
}

#[derive(Serialize, Deserialize)]
pub struct RouteHealth {
    pub name: String,
    pub host: String,
    pub enabled: bool,
}

#[derive(Serialize, Deserialize)]
pub struct StatsResponse {
    pub requests_forwarded: u64,
    pub requests_failed: u64,
    pub requests_rejected: u64,
    pub preflight_answered: u64,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let config = state.forwarder.config();
    let stats = state.forwarder.stats();

    let routes = [
        ("api", &config.hosts.api, config.routes.api),
        ("image", &config.hosts.image, config.routes.image),
        ("oauth", &config.hosts.oauth, config.routes.oauth),
    ]
    .into_iter()
    .map(|(name, host, enabled)| RouteHealth {
        name: name.to_string(),
        host: host.clone(),
        enabled,
    })
    .collect();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: format!(
            "{} ({})",
            env!("FORWARDER_GIT_SHORT"),
            env!("FORWARDER_BUILD_PROFILE")
        ),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        runtime: state.runtime,
        config_source: state.config_source.clone(),
        routes,
        stats: StatsResponse {
            requests_forwarded: stats.forwarded.load(Ordering::Relaxed),
            requests_failed: stats.failed.load(Ordering::Relaxed),
            requests_rejected: stats.rejected.load(Ordering::Relaxed),
            preflight_answered: stats.preflight.load(Ordering::Relaxed),
        },
    })
}
