//! Child health probing.
//!
//! # Data Flow
//! ```text
//! GET /health on the bridge
//!     → probe.rs issues one GET to the child's status endpoint
//!     → result merged with the supervisor phase
//!     → {"status": "healthy" | "starting" | "unhealthy"}
//! ```
//!
//! # Design Decisions
//! - Probing is on-demand only; no background poller keeps state warm
//! - Healthy means exactly HTTP 200 from the status endpoint
//! - A probe timeout counts as unhealthy

pub mod probe;

pub use probe::{probe, ChildHealth};
