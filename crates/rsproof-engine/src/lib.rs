//! rsproof-engine: client for the external grammar engine
//!
//! The grammar engine runs as a separate LanguageTool server. This crate
//! speaks its HTTP API and nothing else; translation into the proofreading
//! result model happens in the API crate's adapter.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               rsproof-engine                │
//! ├─────────────────────────────────────────────┤
//! │  config.rs - Server URL, language, timeout  │
//! │  client.rs - LanguageToolClient             │
//! │  wire.rs   - JSON response types            │
//! └─────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod wire;

pub use client::LanguageToolClient;
pub use config::LanguageToolConfig;
pub use error::{EngineError, EngineResult};
pub use wire::{
    CheckResponse, LanguageInfo, WireCategory, WireMatch, WireMatchType, WireReplacement,
    WireRule,
};
