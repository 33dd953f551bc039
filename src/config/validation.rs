//! Semantic configuration validation.
//!
//! Serde handles syntax; this pass checks the invariants a parsed
//! configuration must still satisfy before the bridge will start.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::BridgeConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address is not a valid socket address: {0}")]
    BadBindAddress(String),

    #[error("child.command must not be empty")]
    EmptyChildCommand,

    #[error("child.port must be non-zero")]
    ZeroChildPort,

    #[error("listener and child must use different ports (both {0})")]
    PortCollision(u16),

    #[error("child.status_path must start with '/': {0}")]
    BadStatusPath(String),
}

/// Validate a parsed configuration, collecting every failure.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let listener_port = match config.listener.bind_address.parse::<SocketAddr>() {
        Ok(addr) => Some(addr.port()),
        Err(_) => {
            errors.push(ValidationError::BadBindAddress(
                config.listener.bind_address.clone(),
            ));
            None
        }
    };

    if config.child.command.trim().is_empty() {
        errors.push(ValidationError::EmptyChildCommand);
    }

    if config.child.port == 0 {
        errors.push(ValidationError::ZeroChildPort);
    } else if listener_port == Some(config.child.port) {
        errors.push(ValidationError::PortCollision(config.child.port));
    }

    if !config.child.status_path.starts_with('/') {
        errors.push(ValidationError::BadStatusPath(
            config.child.status_path.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
