//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (ordered rules → RouteDecision)
//!     → matcher.rs (literal prefix / subtree checks)
//!     → rewrite.rs (upstream path + query → UpstreamTarget)
//! ```
//!
//! # Design Decisions
//! - Rules compiled once at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same path always yields the same decision
//! - First match wins; unknown API paths fall back to the model origin

pub mod matcher;
pub mod rewrite;
pub mod router;

pub use rewrite::{UpstreamTarget, ARCHIVE_PAGE};
pub use router::{RouteDecision, Router};
