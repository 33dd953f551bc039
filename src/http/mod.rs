//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID injection)
//!     → /health handled locally, everything else passed through
//!     → URI rewritten to the child's authority
//!     → response.rs (verbatim relay, JSON bodies for bridge errors)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, BridgeServer};
