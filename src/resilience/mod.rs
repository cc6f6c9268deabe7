//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce upstream deadline)
//!     → on failure: 502 (unreachable) or 504 (deadline)
//! ```
//!
//! # Design Decisions
//! - Every upstream call has a deadline
//! - No retries: a failed forward is reported, never replayed

pub mod timeouts;
