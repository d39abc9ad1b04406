//! Core request forwarding.
//!
//! [`Forwarder::handle`] turns one inbound request into at most one
//! upstream call: pre-flights are answered locally, the path picks the
//! upstream ([`route`]), the client signature is rewritten ([`headers`]),
//! and the call goes through the [`Upstream`] seam ([`upstream`]). The
//! upstream's response is streamed back with CORS headers added; disabled
//! routes and transport failures become JSON errors ([`response`]).

pub mod headers;
pub mod response;
pub mod route;
pub mod upstream;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Method, Request, Uri};
use axum::response::Response;
use tracing::Instrument;

use crate::config::model::Config;
use crate::server::Stats;
use route::TargetDescriptor;
pub use upstream::{HyperUpstream, Upstream, UpstreamError};

pub struct Forwarder {
    config: Arc<Config>,
    upstream: Arc<dyn Upstream>,
    stats: Stats,
}

impl Forwarder {
    #[must_use]
    pub fn new(config: Arc<Config>, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            config,
            upstream,
            stats: Stats::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    pub async fn handle(&self, request: Request<Body>) -> Response {
        let span = tracing::info_span!(
            "forward",
            request_id = %uuid::Uuid::new_v4(),
            method = %request.method(),
            path = %request.uri().path(),
        );
        self.dispatch(request).instrument(span).await
    }

    #[allow(clippy::cast_possible_truncation)]
    async fn dispatch(&self, request: Request<Body>) -> Response {
        if request.method() == Method::OPTIONS {
            self.stats.preflight.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("pre-flight answered locally");
            return response::preflight();
        }

        let (parts, body) = request.into_parts();
        let (class, path) = route::classify(parts.uri.path(), &self.config.routes);

        let Some(host) = class.host(&self.config.hosts) else {
            self.stats.rejected.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(route = class.flag(), "route disabled, request rejected");
            return response::service_not_enabled(class.flag());
        };

        let target = TargetDescriptor::new(host, path, parts.uri.query());
        let uri: Uri = match target.url().parse() {
            Ok(uri) => uri,
            Err(e) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!(upstream = %target.host, error = %e, "invalid target URI");
                return response::bad_gateway(format!("invalid target URI: {e}"), &target.host);
            }
        };

        let forwards_body = parts.method != Method::GET && parts.method != Method::HEAD;
        let mut outbound = Request::new(if forwards_body { body } else { Body::empty() });
        *outbound.method_mut() = parts.method;
        *outbound.uri_mut() = uri;
        *outbound.headers_mut() = headers::build_outbound_headers(
            &parts.headers,
            &target.host,
            &self.config,
            forwards_body,
        );

        let start = Instant::now();
        match self.upstream.send(outbound).await {
            Ok(mut upstream_response) => {
                self.stats.forwarded.fetch_add(1, Ordering::Relaxed);
                tracing::info!(
                    route = %class,
                    upstream = %target.host,
                    status = upstream_response.status().as_u16(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "request forwarded"
                );
                headers::strip_hop_by_hop(upstream_response.headers_mut());
                headers::apply_cors(upstream_response.headers_mut());
                upstream_response
            }
            Err(e) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    route = %class,
                    upstream = %target.host,
                    error = %e,
                    latency_ms = start.elapsed().as_millis() as u64,
                    "upstream call failed"
                );
                response::bad_gateway(e.to_string(), &target.host)
            }
        }
    }
}
