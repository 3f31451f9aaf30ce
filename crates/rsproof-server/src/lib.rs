//! rsproof-server: Configuration and request handlers
//!
//! This crate sits between the HTTP layer and the check engine:
//! - Check handler enforcing gateway limits on text size and batch size
//! - Configuration management
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               rsproof-server                │
//! ├─────────────────────────────────────────────┤
//! │  config.rs   - Configuration management     │
//! │  handlers/   - Request handlers             │
//! │    check/      - Single and bulk checks     │
//! └─────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod handlers;

// Re-exports for convenience
pub use config::{ConfigLoadError, ServerConfig};
pub use handlers::check::{CheckHandler, CheckHandlerError, CheckLimits};
