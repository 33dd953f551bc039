//! Application Bridge Proxy Library

pub mod child;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;

pub use child::ChildSupervisor;
pub use config::BridgeConfig;
pub use http::BridgeServer;
pub use lifecycle::Shutdown;
