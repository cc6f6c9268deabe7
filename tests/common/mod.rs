//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap, Request, Response, StatusCode};
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use moodlens_edge::config::EdgeConfig;
use moodlens_edge::http::HttpServer;
use moodlens_edge::lifecycle::Shutdown;

/// A request as observed by a mock upstream.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Mock upstream that records every request and answers `{"ok":true}`.
#[derive(Clone, Default)]
pub struct Recorder {
    hits: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Recorder {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Seen {
        self.seen
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("upstream saw no request")
    }
}

pub struct MockUpstream {
    pub addr: SocketAddr,
    pub recorder: Recorder,
}

impl MockUpstream {
    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }
}

async fn record(State(recorder): State<Recorder>, request: Request<Body>) -> Response<Body> {
    recorder.hits.fetch_add(1, Ordering::SeqCst);
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    recorder.seen.lock().unwrap().push(Seen {
        method: parts.method.to_string(),
        uri: parts.uri.to_string(),
        headers: parts.headers,
        body,
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"ok":true}"#))
        .unwrap()
}

/// Start a recording upstream on an ephemeral port.
pub async fn start_recording_upstream() -> MockUpstream {
    let recorder = Recorder::default();
    let app = Router::new().fallback(record).with_state(recorder.clone());
    let addr = start_app(app).await;
    MockUpstream { addr, recorder }
}

/// Serve an arbitrary axum app on an ephemeral port.
pub async fn start_app(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Start a backend that answers every connection with a fixed raw HTTP response.
///
/// Gives exact control over which headers the upstream sends.
pub async fn start_raw_backend(response: String) -> SocketAddr {
    start_delayed_raw_backend(response, Duration::ZERO).await
}

/// Like [`start_raw_backend`], but waits `delay` before answering.
pub async fn start_delayed_raw_backend(response: String, delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = Arc::new(response);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let response = response.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 16 * 1024];
                        let _ = socket.read(&mut buf).await;
                        tokio::time::sleep(delay).await;
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Build a raw HTTP/1.1 response with the given extra header lines.
pub fn raw_response(status_line: &str, headers: &[&str], body: &str) -> String {
    let mut out = format!("HTTP/1.1 {status_line}\r\n");
    for h in headers {
        out.push_str(h);
        out.push_str("\r\n");
    }
    out.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    ));
    out
}

/// Asset directory with an SPA index, one script and the archive snapshot.
pub fn assets_fixture() -> PathBuf {
    let root = std::env::temp_dir().join(format!("moodlens-edge-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(root.join("iteration1")).unwrap();
    std::fs::write(root.join("index.html"), "<h1>MoodLens</h1>").unwrap();
    std::fs::write(root.join("app.js"), "console.log('moodlens')").unwrap();
    std::fs::write(root.join("iteration1/index.html"), "<h1>Iteration 1</h1>").unwrap();
    root
}

/// Config pointing at the given origins and a fresh asset fixture.
pub fn edge_config(api_origin: Option<String>, core_origin: Option<String>) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.origins.api_origin = api_origin;
    config.origins.core_origin = core_origin;
    config.assets.root = assets_fixture();
    config.timeouts.upstream_secs = 5;
    config
}

/// A running edge server.
pub struct EdgeHandle {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl EdgeHandle {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for EdgeHandle {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_edge(config: EdgeConfig) -> EdgeHandle {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).expect("edge should build");
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    EdgeHandle { addr, shutdown }
}

/// Test client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}
