//! Response handling and transformation.
//!
//! # Responsibilities
//! - Turn an upstream response into the client response
//! - Default `content-type` to `application/json` when the upstream omits it
//! - Map forwarding errors to gateway status codes
//!
//! # Design Decisions
//! - Streaming responses avoid buffering entire body
//! - Upstream status and headers are otherwise passed through verbatim,
//!   error statuses included
//! - Upstream timeouts result in 504 Gateway Timeout

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Response, StatusCode};
use axum::response::{IntoResponse, Json};
use hyper::body::Incoming;
use serde_json::json;

use crate::error::ProxyError;

/// Content type assumed for upstream bodies that do not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Set `content-type` only if it is missing.
pub fn default_content_type(headers: &mut HeaderMap) {
    if !headers.contains_key(header::CONTENT_TYPE) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(DEFAULT_CONTENT_TYPE),
        );
    }
}

/// Convert the upstream response into the client response.
pub fn from_upstream(response: Response<Incoming>) -> Response<Body> {
    let (mut parts, body) = response.into_parts();
    default_content_type(&mut parts.headers);
    Response::from_parts(parts, Body::new(body))
}

/// Answer to a CORS preflight without contacting any upstream.
pub fn preflight() -> Response<Body> {
    StatusCode::NO_CONTENT.into_response()
}

impl ProxyError {
    /// Status code the client sees for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::OriginNotConfigured { .. }
            | ProxyError::InvalidTarget { .. }
            | ProxyError::Request(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
