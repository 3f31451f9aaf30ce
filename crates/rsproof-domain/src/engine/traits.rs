//! Capability trait for the external grammar engine.

use async_trait::async_trait;

use crate::error::DomainResult;

use super::raw::RawMatch;

/// Sentinel analyzed by the default health check.
pub const HEALTH_CHECK_TEXT: &str = "Health check.";

/// Narrow view of an external grammar-checking engine.
///
/// Implementations are configured for one fixed language and shared by all
/// concurrent requests. An engine that cannot be reused concurrently must
/// be wrapped in [`Exclusive`](super::Exclusive).
#[async_trait]
pub trait GrammarEngine: Send + Sync {
    /// Analyzes `text` and returns the raw matches in reporting order.
    async fn analyze(&self, text: &str) -> DomainResult<Vec<RawMatch>>;

    /// Verifies the engine can currently serve requests.
    ///
    /// Default implementation analyzes a short sentinel text. Override when
    /// the engine offers a cheaper probe.
    async fn health_check(&self) -> DomainResult<()> {
        self.analyze(HEALTH_CHECK_TEXT).await.map(|_| ())
    }
}
