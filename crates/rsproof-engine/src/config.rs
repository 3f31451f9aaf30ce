//! Engine client configuration.

use std::time::Duration;

/// Language checked when none is configured (American English).
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Connection settings for a LanguageTool server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageToolConfig {
    /// Server root, e.g. `http://localhost:8081`. A trailing slash is ignored.
    pub base_url: String,
    /// Language code passed with every check.
    pub language: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for LanguageToolConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl LanguageToolConfig {
    /// Creates a configuration for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the language code.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}
