//! Error types for the request path.
//!
//! Every failure the edge can produce while handling a proxied request is a
//! [`ProxyError`]. The mapping to HTTP status codes lives in
//! `http/response.rs` so this module stays free of axum types.

use std::time::Duration;

use crate::routing::RouteDecision;

/// Errors raised while forwarding a request upstream.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The decision needs an origin that the deployment never configured.
    #[error("no upstream origin configured for route {route}")]
    OriginNotConfigured {
        /// The routing decision that had no origin.
        route: RouteDecision,
    },

    /// Origin base plus rewritten path did not form a valid URL.
    #[error("invalid upstream target {target}: {reason}")]
    InvalidTarget {
        /// The concatenated target string.
        target: String,
        /// Why the target was rejected.
        reason: String,
    },

    /// The outbound request could not be assembled.
    #[error("failed to build upstream request: {0}")]
    Request(#[from] axum::http::Error),

    /// Connection, DNS or protocol failure talking to the upstream.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The upstream did not answer within the configured deadline.
    #[error("upstream did not respond within {after:?}")]
    Timeout {
        /// The deadline that elapsed.
        after: Duration,
    },
}

impl ProxyError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::OriginNotConfigured { .. } => "origin_not_configured",
            ProxyError::InvalidTarget { .. } => "invalid_target",
            ProxyError::Request(_) => "request",
            ProxyError::Upstream(_) => "upstream",
            ProxyError::Timeout { .. } => "timeout",
        }
    }

    /// True when the upstream, not the edge's own setup, is to blame.
    pub fn is_upstream_fault(&self) -> bool {
        matches!(self, ProxyError::Upstream(_) | ProxyError::Timeout { .. })
    }
}

pub type ProxyResult<T> = Result<T, ProxyError>;
