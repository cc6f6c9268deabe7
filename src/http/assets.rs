//! Static asset store.
//!
//! # Responsibilities
//! - Serve the built SPA for every non-API path
//! - Serve the archived `/iteration1` snapshot page
//!
//! # Design Decisions
//! - Non-API requests reach the file service untouched
//! - Archive requests are answered as `GET /iteration1/index.html`
//!   whatever the inbound method or sub-path
//! - With `spa_fallback`, unknown paths get `index.html` so history-mode
//!   client routes survive a reload

use std::convert::Infallible;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::AssetsConfig;
use crate::routing::ARCHIVE_PAGE;

#[derive(Clone)]
enum FileService {
    Spa(ServeDir<ServeFile>),
    Plain(ServeDir),
}

/// Files under the configured `ASSETS` root.
#[derive(Clone)]
pub struct AssetStore {
    files: FileService,
    archive: ServeFile,
}

impl AssetStore {
    pub fn new(config: &AssetsConfig) -> Self {
        let root = &config.root;
        let files = if config.spa_fallback {
            FileService::Spa(ServeDir::new(root).fallback(ServeFile::new(root.join("index.html"))))
        } else {
            FileService::Plain(ServeDir::new(root))
        };
        let archive = ServeFile::new(root.join(ARCHIVE_PAGE.trim_start_matches('/')));

        Self { files, archive }
    }

    /// Hand a non-API request to the file service unchanged.
    pub async fn serve(&self, request: Request<Body>) -> Response<Body> {
        let result = match self.files.clone() {
            FileService::Spa(svc) => svc.oneshot(request).await.map(|r| r.map(Body::new)),
            FileService::Plain(svc) => svc.oneshot(request).await.map(|r| r.map(Body::new)),
        };
        unwrap_infallible(result)
    }

    /// Answer an archive path with the snapshot page.
    pub async fn serve_archive(&self) -> Response<Body> {
        let mut request = Request::new(Body::empty());
        *request.method_mut() = Method::GET;
        *request.uri_mut() = axum::http::Uri::from_static(ARCHIVE_PAGE);

        let result = self
            .archive
            .clone()
            .oneshot(request)
            .await
            .map(|r| r.map(Body::new));
        unwrap_infallible(result)
    }
}

fn unwrap_infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
