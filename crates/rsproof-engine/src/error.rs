//! Engine client error types.

use thiserror::Error;

/// Errors raised while talking to the grammar engine server.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The server could not be reached.
    #[error("engine connection error: {message}")]
    Connection { message: String },

    /// The server did not answer within the configured timeout.
    #[error("engine request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The server answered with a non-success status.
    #[error("engine returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The server refused the submitted text itself (413, 414 or 422),
    /// e.g. because it exceeds the server's text size limit.
    #[error("engine rejected the text with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("invalid engine response: {message}")]
    InvalidResponse { message: String },

    /// The client configuration is unusable.
    #[error("invalid engine configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type for engine client operations.
pub type EngineResult<T> = Result<T, EngineError>;
