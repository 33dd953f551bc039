//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main):
//!     Load config → spawn child → bind listener → serve
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → server drains → child terminated → exit
//! ```
//!
//! # Design Decisions
//! - Ordered shutdown: stop accepting, drain, then stop the child
//! - A second signal forces immediate exit

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
