//! Upstream forwarding.
//!
//! # Data Flow
//! ```text
//! proxied request
//!     → OPTIONS? answer 204, stop
//!     → pick origin for the RouteDecision
//!     → UpstreamTarget (rewritten path + query)
//!     → sanitize headers, attach body (none for GET/HEAD)
//!     → client call under deadline
//!     → from_upstream (content-type default, streamed body)
//! ```

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::config::{Origins, TimeoutConfig};
use crate::error::{ProxyError, ProxyResult};
use crate::http::response::{from_upstream, preflight};
use crate::resilience::timeouts::with_deadline;
use crate::routing::{RouteDecision, UpstreamTarget};
use crate::security::sanitize_upstream_headers;

pub type UpstreamClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Error raised when the TLS stack cannot be initialised.
#[derive(Debug, thiserror::Error)]
#[error("failed to install rustls crypto provider")]
pub struct TlsInitError;

/// Build the shared HTTP(S) client.
pub fn build_client(timeouts: &TimeoutConfig) -> Result<UpstreamClient, TlsInitError> {
    static RUSTLS_INIT: OnceLock<bool> = OnceLock::new();
    let installed = RUSTLS_INIT.get_or_init(|| {
        // Err means a provider is already installed, which is fine.
        let _ = rustls::crypto::ring::default_provider().install_default();
        rustls::crypto::CryptoProvider::get_default().is_some()
    });
    if !installed {
        return Err(TlsInitError);
    }

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_nodelay(true);
    http.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

    let https = HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(http);

    Ok(Client::builder(TokioExecutor::new()).build(https))
}

/// Forwards proxied requests to the configured origins.
#[derive(Clone)]
pub struct Forwarder {
    client: UpstreamClient,
    origins: Arc<Origins>,
    deadline: Duration,
}

impl Forwarder {
    pub fn new(client: UpstreamClient, origins: Origins, deadline: Duration) -> Self {
        Self {
            client,
            origins: Arc::new(origins),
            deadline,
        }
    }

    /// Resolve the upstream target for a proxied path.
    pub fn target(
        &self,
        decision: RouteDecision,
        path: &str,
        query: Option<&str>,
    ) -> ProxyResult<UpstreamTarget> {
        let origin = self
            .origins
            .for_decision(decision)
            .ok_or(ProxyError::OriginNotConfigured { route: decision })?;
        UpstreamTarget::resolve(origin, path, query)
    }

    /// Forward one request.
    pub async fn forward(
        &self,
        decision: RouteDecision,
        request: Request<Body>,
    ) -> ProxyResult<Response<Body>> {
        if request.method() == Method::OPTIONS {
            tracing::debug!(path = %request.uri().path(), "Answering preflight locally");
            return Ok(preflight());
        }

        let target = self.target(decision, request.uri().path(), request.uri().query())?;
        tracing::debug!(route = %decision, target = %target.as_str(), "Forwarding upstream");

        let (parts, body) = request.into_parts();
        let mut headers = parts.headers;
        sanitize_upstream_headers(&mut headers, &target.authority());

        let body = if parts.method == Method::GET || parts.method == Method::HEAD {
            // Framing headers would describe a body that is no longer sent.
            headers.remove(header::CONTENT_LENGTH);
            headers.remove(header::TRANSFER_ENCODING);
            Body::empty()
        } else {
            body
        };

        let mut upstream = Request::builder()
            .method(parts.method)
            .uri(target.as_str())
            .body(body)?;
        *upstream.headers_mut() = headers;

        let response = with_deadline(self.deadline, self.client.request(upstream)).await?;
        Ok(from_upstream(response))
    }
}
