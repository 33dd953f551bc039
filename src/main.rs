//! Application Bridge Proxy
//!
//! A thin bridge that launches a secondary web application as a child
//! process and forwards all inbound HTTP traffic to it.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────┐
//!                      │                  BRIDGE                     │
//!                      │                                             │
//!     Client Request   │  ┌─────────┐    ┌──────────────┐           │
//!     ─────────────────┼─▶│  http   │───▶│ pass-through │──────────┼──▶ Child
//!                      │  │ server  │    │   handler    │           │    Process
//!     Client Response  │  └─────────┘    └──────────────┘           │  (launched
//!     ◀────────────────┼──── verbatim relay ◀───────────────────────┼──  by child/
//!                      │                                             │   supervisor)
//!                      │  ┌──────────────────────────────────────┐  │
//!                      │  │         Cross-Cutting Concerns        │  │
//!                      │  │  ┌────────┐ ┌────────┐ ┌───────────┐ │  │
//!                      │  │  │ config │ │ health │ │ lifecycle │ │  │
//!                      │  │  └────────┘ └────────┘ └───────────┘ │  │
//!                      │  └──────────────────────────────────────┘  │
//!                      └────────────────────────────────────────────┘
//! ```
//!
//! `/health` is answered by the bridge itself (one diagnostic GET to the
//! child's status endpoint); every other path and method is forwarded
//! unchanged. SIGTERM/SIGINT drain the server and terminate the child
//! before the bridge exits.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app_bridge::child::ChildSupervisor;
use app_bridge::config::{self, BridgeConfig};
use app_bridge::http::BridgeServer;
use app_bridge::lifecycle::{signals, Shutdown};

#[derive(Parser)]
#[command(name = "app-bridge")]
#[command(about = "Launches a child web application and proxies all traffic to it")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listener port override (also read from the PORT environment variable).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => BridgeConfig::default(),
    };
    config::apply_env_overrides(&mut config)?;
    if let Some(port) = cli.port {
        config.listener.set_port(port);
    }
    config::validate_config(&config).map_err(config::ConfigError::Validation)?;

    // Initialize tracing subscriber; RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "app_bridge={},tower_http=info",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("app-bridge v0.1.0 starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        child_command = %config.child.command,
        child_port = config.child.port,
        startup_delay_secs = config.child.startup_delay_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::listen(shutdown.clone());

    // Spawn failure is not fatal: the bridge keeps serving and reports 503
    // until the operator intervenes.
    let supervisor = Arc::new(ChildSupervisor::new(config.child.clone()));
    if let Err(e) = supervisor.start().await {
        tracing::error!(error = %e, "Failed to start child process");
    }
    tokio::spawn(supervisor.clone().watch(shutdown.subscribe()));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = BridgeServer::new(&config, supervisor.clone())?;
    server.run(listener, shutdown.subscribe()).await?;

    // Server has drained; take the child down before exiting.
    supervisor.stop().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
