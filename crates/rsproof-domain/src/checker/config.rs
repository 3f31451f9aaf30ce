//! Configuration for the check engine.

/// Configuration for [`CheckEngine`](super::CheckEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckEngineConfig {
    /// Maximum number of texts of one bulk check analyzed concurrently.
    /// Values below 1 are treated as 1.
    pub max_concurrency: usize,
}

impl Default for CheckEngineConfig {
    fn default() -> Self {
        Self { max_concurrency: 4 }
    }
}

impl CheckEngineConfig {
    /// Creates a configuration with the specified bulk concurrency.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Processes bulk checks one text at a time.
    pub fn sequential() -> Self {
        Self { max_concurrency: 1 }
    }
}
