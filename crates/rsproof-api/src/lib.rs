//! rsproof-api: HTTP API layer
//!
//! This crate provides the API layer including:
//! - HTTP endpoints via Axum
//! - The adapter connecting the LanguageTool client to the domain
//! - Middleware (request id, metrics, tracing, logging)
//! - Logging and Prometheus setup
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                rsproof-api                  │
//! ├─────────────────────────────────────────────┤
//! │  http/          - HTTP endpoints            │
//! │  adapters.rs    - Engine client -> domain   │
//! │  middleware/    - Request id, metrics, logs │
//! │  observability/ - Logging & metrics setup   │
//! └─────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod http;
pub mod middleware;
pub mod observability;
