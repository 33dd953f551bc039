//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bridge.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Child process definition.
    pub child: ChildConfig,

    /// Health probe settings.
    pub health: HealthConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl ListenerConfig {
    /// Replace the port portion of the bind address.
    pub fn set_port(&mut self, port: u16) {
        let host = self
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or("0.0.0.0");
        self.bind_address = format!("{host}:{port}");
    }

    /// Port portion of the bind address, if it parses.
    pub fn port(&self) -> Option<u16> {
        self.bind_address
            .rsplit_once(':')
            .and_then(|(_, port)| port.parse().ok())
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Definition of the child web process the bridge launches and fronts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChildConfig {
    /// Executable to launch.
    pub command: String,

    /// Arguments passed to the executable.
    pub args: Vec<String>,

    /// Port the child listens on. Injected into the child as `PORT`.
    pub port: u16,

    /// Extra environment variables for the child.
    pub env: BTreeMap<String, String>,

    /// Seconds to wait after spawning before the child is assumed ready.
    pub startup_delay_secs: u64,

    /// Path on the child probed by the bridge's health endpoint.
    pub status_path: String,

    /// Seconds to wait for the child to exit after SIGTERM before killing it.
    pub shutdown_grace_secs: u64,
}

impl ChildConfig {
    /// Authority (host:port) the bridge forwards to.
    pub fn authority(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}

impl Default for ChildConfig {
    fn default() -> Self {
        let mut env = BTreeMap::new();
        env.insert("NODE_ENV".to_string(), "production".to_string());

        Self {
            command: "npm".to_string(),
            args: vec!["start".to_string()],
            port: 5001,
            env,
            startup_delay_secs: 10,
            status_path: "/api/stats".to_string(),
            shutdown_grace_secs: 5,
        }
    }
}

/// Health probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Probe timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

/// Timeout configuration for the pass-through path.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
