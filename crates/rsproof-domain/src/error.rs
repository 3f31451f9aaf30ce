//! Domain error types for proofreading operations.

use thiserror::Error;

/// Domain-specific errors for check operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The external grammar engine could not serve the call
    /// (initialization failure, transport error, missing data).
    #[error("grammar engine unavailable: {reason}")]
    EngineUnavailable { reason: String },

    /// The engine refused the text itself (for example it exceeds the
    /// engine's size limit). Retrying the same text will not help.
    #[error("grammar engine rejected the text: {reason}")]
    TextRejected { reason: String },

    /// The external grammar engine did not answer in time.
    #[error("grammar engine timed out after {duration_ms}ms")]
    EngineTimeout { duration_ms: u64 },

    /// The engine reported something outside the known result contract.
    #[error("engine result mapping failed: {0}")]
    Mapping(#[from] MappingError),
}

/// Errors raised while translating raw engine matches.
///
/// Every variant signals drift between this service and the engine it wraps
/// (usually an engine upgrade). They are never defaulted away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Match type outside {UnknownWord, Hint, Other}.
    #[error("unrecognized match type: {value:?}")]
    UnknownMatchType { value: String },

    /// ITS issue type outside the known localization quality taxonomy.
    #[error("unrecognized ITS issue type: {value:?}")]
    UnknownIssueType { value: String },

    /// Match end lies before its start.
    #[error("match for rule {rule_id} ends before it starts ({from_pos}..{to_pos})")]
    NegativeSpan {
        rule_id: String,
        from_pos: usize,
        to_pos: usize,
    },

    /// Match span reaches past the end of the checked text.
    #[error(
        "match for rule {rule_id} at offset {offset} with length {length} exceeds text length {text_len}"
    )]
    SpanOutOfBounds {
        rule_id: String,
        offset: usize,
        length: usize,
        text_len: usize,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
