//! Child process management subsystem.
//!
//! # Data Flow
//! ```text
//! Spawn (supervisor.rs):
//!     Command + env (PORT injected)
//!     → child handle (owned by the supervisor)
//!     → stdout/stderr relay tasks
//!
//! Readiness:
//!     fixed startup delay elapses → phase Starting → Running
//!
//! Watch:
//!     periodic try_wait → phase Exited on unexpected death
//!
//! Stop:
//!     SIGTERM → grace wait → SIGKILL → phase Stopped
//! ```
//!
//! # Design Decisions
//! - Readiness is a timer, not a probe: the child is assumed up once the
//!   configured delay elapses
//! - No restart on unexpected exit; the operator restarts the bridge
//! - The supervisor holds the only handle to the child process

pub mod supervisor;

pub use supervisor::{ChildError, ChildPhase, ChildSupervisor};
