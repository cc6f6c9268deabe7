//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Origins that are set must be absolute http(s) URLs with a host
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - A missing origin is not an error: requests routed to it answer 500
//!   and the gap is logged at startup

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::EdgeConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: `{value}` is not a valid URL ({reason})")]
    InvalidOrigin {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: scheme `{scheme}` is not http or https")]
    UnsupportedScheme { field: &'static str, scheme: String },

    #[error("{field}: `{value}` is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

/// Validate a loaded configuration.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let origins = [
        ("origins.api_origin", &config.origins.api_origin),
        ("origins.core_origin", &config.origins.core_origin),
        ("origins.backend_url", &config.origins.backend_url),
    ];
    for (field, value) in origins {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            if let Err(e) = check_origin(field, value) {
                errors.push(e);
            }
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "timeouts.connect_secs" });
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "timeouts.upstream_secs" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_origin(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let url = Url::parse(value).map_err(|e| ValidationError::InvalidOrigin {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::UnsupportedScheme {
                field,
                scheme: other.to_string(),
            })
        }
    }

    if url.host_str().is_none() {
        return Err(ValidationError::InvalidOrigin {
            field,
            value: value.to_string(),
            reason: "missing host".to_string(),
        });
    }

    // Request paths are appended to the origin; a query or fragment would swallow them.
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ValidationError::InvalidOrigin {
            field,
            value: value.to_string(),
            reason: "origin must not carry a query or fragment".to_string(),
        });
    }

    Ok(())
}
