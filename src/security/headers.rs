//! Outbound header sanitization.
//!
//! # Responsibilities
//! - Point `Host` at the upstream authority
//! - Force `Accept: application/json, */*`
//! - Strip headers that identify the browser origin or the edge network
//!
//! # Design Decisions
//! - Applied to the upstream-facing request only; responses are untouched
//! - Everything not listed passes through, including `Authorization`

use axum::http::{header, HeaderMap, HeaderValue};

/// Value forced onto the outbound `Accept` header.
pub const UPSTREAM_ACCEPT: &str = "application/json, */*";

/// Headers removed before forwarding.
pub const STRIPPED_HEADERS: &[&str] = &[
    "origin",
    "referer",
    "cf-connecting-ip",
    "cf-ipcountry",
    "x-forwarded-host",
    "x-forwarded-proto",
];

/// Rewrite `headers` in place for a request to `upstream_authority`.
pub fn sanitize_upstream_headers(headers: &mut HeaderMap, upstream_authority: &str) {
    for name in STRIPPED_HEADERS {
        headers.remove(*name);
    }

    match HeaderValue::from_str(upstream_authority) {
        Ok(host) => {
            headers.insert(header::HOST, host);
        }
        Err(_) => {
            // Url already validated the host; drop the stale one rather than forward it.
            tracing::warn!(authority = %upstream_authority, "Upstream authority is not a valid header value");
            headers.remove(header::HOST);
        }
    }

    headers.insert(header::ACCEPT, HeaderValue::from_static(UPSTREAM_ACCEPT));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("moodlens.pages.dev"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        headers.insert(header::ORIGIN, HeaderValue::from_static("https://moodlens.pages.dev"));
        headers.insert(header::REFERER, HeaderValue::from_static("https://moodlens.pages.dev/test"));
        headers.insert("CF-Connecting-IP", HeaderValue::from_static("203.0.113.9"));
        headers.insert("CF-IPCountry", HeaderValue::from_static("AU"));
        headers.insert("X-Forwarded-Host", HeaderValue::from_static("moodlens.pages.dev"));
        headers.insert("X-Forwarded-Proto", HeaderValue::from_static("https"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer token"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    #[test]
    fn test_strips_identifying_headers() {
        let mut headers = inbound();
        sanitize_upstream_headers(&mut headers, "backend.example.com");

        for name in STRIPPED_HEADERS {
            assert!(!headers.contains_key(*name), "{name} should be stripped");
        }
    }

    #[test]
    fn test_sets_host_and_accept() {
        let mut headers = inbound();
        sanitize_upstream_headers(&mut headers, "127.0.0.1:8000");

        assert_eq!(headers[header::HOST], "127.0.0.1:8000");
        assert_eq!(headers[header::ACCEPT], UPSTREAM_ACCEPT);
        assert_eq!(headers.get_all(header::ACCEPT).iter().count(), 1);
    }

    #[test]
    fn test_keeps_everything_else() {
        let mut headers = inbound();
        sanitize_upstream_headers(&mut headers, "backend.example.com");

        assert_eq!(headers[header::AUTHORIZATION], "Bearer token");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }
}
