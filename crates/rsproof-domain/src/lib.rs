//! rsproof-domain: Core proofreading domain logic
//!
//! This crate contains everything between an inbound text and the
//! serializable result returned to clients:
//! - Versioned result types (`CheckResult`, `RuleMatchResult`, ...)
//! - The result mapper translating raw engine matches into those types
//! - The `GrammarEngine` capability trait wrapping the external checker
//! - `CheckEngine`, the warmed-up handle serving single and bulk checks
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               rsproof-domain                 │
//! ├─────────────────────────────────────────────┤
//! │  result/  - Result types & mapper           │
//! │  engine/  - Engine trait & raw match types  │
//! │  checker/ - CheckEngine (init, check)       │
//! └─────────────────────────────────────────────┘
//! ```

pub mod checker;
pub mod engine;
pub mod error;
pub mod result;

// Re-export commonly used types at the crate root
pub use checker::{CheckEngine, CheckEngineConfig, WARM_UP_TEXT};
pub use engine::{Exclusive, GrammarEngine, RawCategory, RawMatch, RawRule};
pub use error::{DomainError, DomainResult, MappingError};
pub use result::{
    CategoryResult, CheckResult, ItsIssueType, MatchType, RuleMatchResult, RuleResult,
};
