//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::routing::RouteDecision;

/// Root configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream origins the API paths are forwarded to.
    pub origins: OriginConfig,

    /// Static asset store.
    pub assets: AssetsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream origin base URLs.
///
/// `backend_url` is the legacy single-origin setting; it stands in for
/// whichever of the two split origins is left unset.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OriginConfig {
    /// Model origin (`API_ORIGIN`).
    pub api_origin: Option<String>,

    /// Core business origin (`CORE_ORIGIN`).
    pub core_origin: Option<String>,

    /// Legacy sole upstream (`BACKEND_URL`).
    pub backend_url: Option<String>,
}

impl OriginConfig {
    /// Effective model origin string, after the legacy fallback.
    pub fn effective_api(&self) -> Option<&str> {
        non_empty(&self.api_origin).or_else(|| non_empty(&self.backend_url))
    }

    /// Effective core origin string, after the legacy fallback.
    pub fn effective_core(&self) -> Option<&str> {
        non_empty(&self.core_origin).or_else(|| non_empty(&self.backend_url))
    }

    /// Parse the effective origins.
    ///
    /// Unparseable values are rejected by validation before this is called
    /// on the serving path; here they simply resolve to `None`.
    pub fn resolve(&self) -> Origins {
        Origins {
            model: self.effective_api().and_then(|s| Url::parse(s).ok()),
            core: self.effective_core().and_then(|s| Url::parse(s).ok()),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Parsed upstream origins, fixed for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Origins {
    pub model: Option<Url>,
    pub core: Option<Url>,
}

impl Origins {
    /// Origin serving a proxied decision.
    pub fn for_decision(&self, decision: RouteDecision) -> Option<&Url> {
        match decision {
            RouteDecision::ProxyToModelOrigin => self.model.as_ref(),
            RouteDecision::ProxyToCoreOrigin => self.core.as_ref(),
            RouteDecision::ServeStaticArchive | RouteDecision::PassThroughToAssets => None,
        }
    }
}

/// Static asset store configuration (`ASSETS`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding the built SPA and the `iteration1/` snapshot.
    pub root: PathBuf,

    /// Serve `index.html` for paths with no matching file.
    pub spa_fallback: bool,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("dist"),
            spa_fallback: true,
        }
    }
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Time allowed for the upstream to return response headers, in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
