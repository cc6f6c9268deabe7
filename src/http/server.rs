//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the single edge handler
//! - Wire up middleware (request ID, tracing)
//! - Dispatch each request on its RouteDecision
//! - Log and count the decision, the chosen origin and the final status

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, Response},
    response::IntoResponse,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::EdgeConfig;
use crate::http::assets::AssetStore;
use crate::http::forward::{build_client, Forwarder, TlsInitError};
use crate::http::request::{request_id, request_span, MakeRequestUuid};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::routing::{RouteDecision, Router as EdgeRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<EdgeRouter>,
    pub forwarder: Forwarder,
    pub assets: AssetStore,
}

/// HTTP server for the edge.
pub struct HttpServer {
    router: Router,
    config: EdgeConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, TlsInitError> {
        let origins = config.origins.resolve();
        if origins.model.is_none() {
            tracing::warn!("No model origin configured (API_ORIGIN / BACKEND_URL); model routes will answer 500");
        }
        if origins.core.is_none() {
            tracing::warn!("No core origin configured (CORE_ORIGIN / BACKEND_URL); core routes will answer 500");
        }

        let client = build_client(&config.timeouts)?;
        let forwarder = Forwarder::new(
            client,
            origins,
            Duration::from_secs(config.timeouts.upstream_secs),
        );

        let state = AppState {
            router: Arc::new(EdgeRouter::new()),
            forwarder,
            assets: AssetStore::new(&config.assets),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(edge_handler))
            .route("/{*path}", any(edge_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            assets = %self.config.assets.root.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Classify, then serve from assets or forward upstream.
async fn edge_handler(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let id = request_id(request.headers()).to_string();

    let decision = state.router.classify(&path);
    metrics::record_decision(decision);
    tracing::debug!(request_id = %id, path = %path, route = %decision, "Request classified");

    let response = match decision {
        RouteDecision::ServeStaticArchive => state.assets.serve_archive().await,
        RouteDecision::PassThroughToAssets => state.assets.serve(request).await,
        RouteDecision::ProxyToModelOrigin | RouteDecision::ProxyToCoreOrigin => {
            match state.forwarder.forward(decision, request).await {
                Ok(response) => response,
                Err(e) => {
                    metrics::record_upstream_error(e.kind());
                    if e.is_upstream_fault() {
                        tracing::warn!(request_id = %id, route = %decision, error = %e, "Upstream failure");
                    } else {
                        tracing::error!(request_id = %id, route = %decision, error = %e, "Edge misconfiguration");
                    }
                    e.into_response()
                }
            }
        }
    };

    let status = response.status().as_u16();
    metrics::record_request(&method, status, decision, start);
    tracing::info!(
        request_id = %id,
        method = %method,
        path = %path,
        route = %decision,
        status,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}
