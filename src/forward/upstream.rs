//! The single outbound call.
//!
//! [`Upstream`] is the seam between the forwarder and the network: the
//! production [`HyperUpstream`] sends over the pooled hyper + rustls
//! client, tests substitute a recording double. Bodies stream in both
//! directions; nothing is buffered here.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};

use crate::server::HttpClient;

/// Transport-level failure of the outbound call (DNS, connect, TLS, I/O).
/// HTTP error statuses from the upstream are not failures.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct UpstreamError {
    message: String,
}

impl UpstreamError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Flatten an error and its source chain into one message, so callers
    /// see "connection refused" rather than only "client error (Connect)".
    #[must_use]
    pub fn from_chain(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        Self { message }
    }
}

// async_trait is required here because Upstream is used as Arc<dyn Upstream>
// and native async fn in traits does not support dyn dispatch.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, UpstreamError>;
}

pub struct HyperUpstream {
    client: HttpClient,
}

impl HyperUpstream {
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Upstream for HyperUpstream {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, UpstreamError> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| UpstreamError::from_chain(&e))?;
        Ok(response.map(Body::new))
    }
}
