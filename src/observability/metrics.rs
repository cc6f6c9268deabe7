//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by method, status, route
//! - `edge_request_duration_seconds` (histogram): latency by route
//! - `edge_route_decisions_total` (counter): classification outcomes
//! - `edge_upstream_errors_total` (counter): forwarding failures by kind
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::RouteDecision;

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Label value for a request method; extension methods share `other`.
pub fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::HEAD => "HEAD",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::PATCH => "PATCH",
        Method::OPTIONS => "OPTIONS",
        Method::CONNECT => "CONNECT",
        Method::TRACE => "TRACE",
        _ => "other",
    }
}

/// Record a completed request.
pub fn record_request(method: &Method, status: u16, route: RouteDecision, start: Instant) {
    metrics::counter!(
        "edge_requests_total",
        "method" => method_label(method),
        "status" => status.to_string(),
        "route" => route.as_str()
    )
    .increment(1);
    metrics::histogram!("edge_request_duration_seconds", "route" => route.as_str())
        .record(start.elapsed().as_secs_f64());
}

/// Record the classification of one request.
pub fn record_decision(route: RouteDecision) {
    metrics::counter!("edge_route_decisions_total", "route" => route.as_str()).increment(1);
}

/// Record a failed forward.
pub fn record_upstream_error(kind: &'static str) {
    metrics::counter!("edge_upstream_errors_total", "kind" => kind).increment(1);
}
