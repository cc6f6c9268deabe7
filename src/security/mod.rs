//! Security subsystem.
//!
//! # Components
//! - headers.rs: strips client-identifying headers before forwarding

pub mod headers;

pub use headers::sanitize_upstream_headers;
