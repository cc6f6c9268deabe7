//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace span)
//!     → routing layer classifies the path
//!     → assets.rs (archive page or static files)
//!       or forward.rs (sanitize, rewrite, call upstream)
//!     → response.rs (content-type default, error mapping)
//!     → Send to client
//! ```

pub mod assets;
pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
