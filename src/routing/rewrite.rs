//! Upstream path rewriting and target construction.
//!
//! # Rules
//! - `/i3/api/...` is an alias mount for `/api/...`
//! - `/api/moderate...` is served upstream under `/i3/api/moderate...`
//! - every other API path loses its leading `/api`
//! - the query string is appended unchanged

use url::Url;

use crate::error::{ProxyError, ProxyResult};

/// Page served for every path under the archive mount.
pub const ARCHIVE_PAGE: &str = "/iteration1/index.html";

const API_PREFIX: &str = "/api";
const I3_MOUNT: &str = "/i3";
const MODERATE_PREFIX: &str = "/api/moderate";

/// Map an inbound path onto its canonical `/api/...` form.
///
/// Returns `None` for paths the proxy does not handle.
pub fn canonical_api_path(path: &str) -> Option<&str> {
    if path.starts_with("/api/") {
        return Some(path);
    }
    path.strip_prefix(I3_MOUNT)
        .filter(|rest| rest.starts_with("/api/"))
}

/// Path the upstream expects for a proxied inbound path.
///
/// Non-API paths are returned unchanged.
pub fn upstream_path(path: &str) -> String {
    let Some(api_path) = canonical_api_path(path) else {
        return path.to_string();
    };

    if api_path.starts_with(MODERATE_PREFIX) {
        return format!("{I3_MOUNT}{api_path}");
    }

    api_path
        .strip_prefix(API_PREFIX)
        .unwrap_or(api_path)
        .to_string()
}

/// Fully resolved upstream URL for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    url: Url,
}

impl UpstreamTarget {
    /// Join origin base, rewritten path and the original query.
    ///
    /// Trailing slashes on the origin are trimmed before concatenation so an
    /// origin configured as `https://host/` does not produce `//path`.
    pub fn resolve(origin: &Url, path: &str, query: Option<&str>) -> ProxyResult<Self> {
        let base = origin.as_str().trim_end_matches('/');
        let mut target = format!("{base}{}", upstream_path(path));
        if let Some(query) = query {
            target.push('?');
            target.push_str(query);
        }

        let url = Url::parse(&target).map_err(|e| ProxyError::InvalidTarget {
            target: target.clone(),
            reason: e.to_string(),
        })?;

        if url.host_str().is_none() {
            return Err(ProxyError::InvalidTarget {
                target,
                reason: "target has no host".to_string(),
            });
        }

        Ok(Self { url })
    }

    /// `host[:port]` as it must appear in the `Host` header.
    pub fn authority(&self) -> String {
        match (self.url.host_str(), self.url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}
