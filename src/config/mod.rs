//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (API_ORIGIN, CORE_ORIGIN, BACKEND_URL, ASSETS)
//!     → validation.rs (semantic checks)
//!     → EdgeConfig (validated, immutable)
//!     → passed by value into HttpServer::new
//! ```
//!
//! # Design Decisions
//! - Config is fixed at deploy time; no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AssetsConfig, EdgeConfig, ListenerConfig, LogFormat, ObservabilityConfig, OriginConfig,
    Origins, TimeoutConfig,
};
