//! Responses the forwarder produces itself, without an upstream call.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::headers::apply_cors;

/// JSON body of the 403 and 502 responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

pub const SERVICE_NOT_ENABLED: &str = "Service not enabled";

/// 204 answer to a CORS pre-flight.
#[must_use]
pub fn preflight() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    apply_cors(response.headers_mut());
    response
}

/// 403 for a request whose route is switched off.
#[must_use]
pub fn service_not_enabled(flag: &str) -> Response {
    let body = ErrorBody {
        error: SERVICE_NOT_ENABLED.into(),
        hint: Some(format!(
            "route '{flag}' is disabled, set routes.{flag} = true in the forwarder config"
        )),
        target: None,
    };
    (StatusCode::FORBIDDEN, Json(body)).into_response()
}

/// 502 for an outbound call that failed at the transport level.
#[must_use]
pub fn bad_gateway(message: String, target_host: &str) -> Response {
    let body = ErrorBody {
        error: message,
        hint: None,
        target: Some(target_host.to_string()),
    };
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}
