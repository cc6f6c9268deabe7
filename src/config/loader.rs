//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::EdgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Environment variables that override file settings.
pub const ENV_API_ORIGIN: &str = "API_ORIGIN";
pub const ENV_CORE_ORIGIN: &str = "CORE_ORIGIN";
pub const ENV_BACKEND_URL: &str = "BACKEND_URL";
pub const ENV_ASSETS: &str = "ASSETS";
pub const ENV_BIND: &str = "EDGE_BIND";

/// Load configuration: optional TOML file, then environment, then validation.
pub fn load_config(path: Option<&Path>) -> Result<EdgeConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => EdgeConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply deployment environment variables on top of file settings.
///
/// `lookup` is injected so tests do not touch the process environment.
pub fn apply_env_overrides<F>(config: &mut EdgeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(ENV_API_ORIGIN) {
        config.origins.api_origin = Some(v);
    }
    if let Some(v) = lookup(ENV_CORE_ORIGIN) {
        config.origins.core_origin = Some(v);
    }
    if let Some(v) = lookup(ENV_BACKEND_URL) {
        config.origins.backend_url = Some(v);
    }
    if let Some(v) = lookup(ENV_ASSETS) {
        config.assets.root = PathBuf::from(v);
    }
    if let Some(v) = lookup(ENV_BIND) {
        config.listener.bind_address = v;
    }
}
