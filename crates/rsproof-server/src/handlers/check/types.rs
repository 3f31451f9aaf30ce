//! Data types for check handling.

use rsproof_domain::DomainError;

/// Limits applied to incoming check requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckLimits {
    /// Maximum number of texts in one bulk check.
    pub max_bulk_texts: usize,
    /// Maximum characters (Unicode scalar values) in one text.
    pub max_text_chars: usize,
}

impl Default for CheckLimits {
    fn default() -> Self {
        Self {
            max_bulk_texts: 100,
            max_text_chars: 100_000,
        }
    }
}

/// Errors that can occur while handling a check request.
#[derive(Debug, thiserror::Error)]
pub enum CheckHandlerError {
    /// The bulk request carries more texts than allowed.
    #[error("bulk check contains {count} texts, maximum allowed is {max}")]
    TooManyTexts { count: usize, max: usize },

    /// A text exceeds the character limit. `index` is set for bulk requests.
    #[error("{}text length {length} exceeds maximum allowed {max} characters", .index.map(|i| format!("texts[{i}]: ")).unwrap_or_default())]
    TextTooLong {
        index: Option<usize>,
        length: usize,
        max: usize,
    },

    /// The check engine failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type for check handler operations.
pub type CheckHandlerResult<T> = Result<T, CheckHandlerError>;
