//! Configuration loading from disk and the environment.

use std::path::Path;

use thiserror::Error;

use crate::config::schema::BridgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid PORT environment variable: {0}")]
    InvalidPort(String),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: BridgeConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides.
///
/// `PORT` overrides the listener port, matching the hosting platforms the
/// bridge is deployed on.
pub fn apply_env_overrides(config: &mut BridgeConfig) -> Result<(), ConfigError> {
    if let Ok(value) = std::env::var("PORT") {
        let port: u16 = value
            .parse()
            .map_err(|_| ConfigError::InvalidPort(value.clone()))?;
        config.listener.set_port(port);
    }
    Ok(())
}
