//! Check handler implementation.

use std::sync::Arc;

use rsproof_domain::{CheckEngine, CheckResult, DomainResult, GrammarEngine};
use tracing::{debug, warn};

use super::types::{CheckHandlerError, CheckHandlerResult, CheckLimits};

/// Handler for single and bulk checks.
///
/// Validates requests against [`CheckLimits`] and forwards accepted ones to
/// the shared [`CheckEngine`].
pub struct CheckHandler<E: GrammarEngine> {
    engine: Arc<CheckEngine<E>>,
    limits: CheckLimits,
}

impl<E: GrammarEngine> Clone for CheckHandler<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            limits: self.limits,
        }
    }
}

impl<E: GrammarEngine> CheckHandler<E> {
    /// Creates a new check handler.
    pub fn new(engine: Arc<CheckEngine<E>>, limits: CheckLimits) -> Self {
        Self { engine, limits }
    }

    /// Returns the configured limits.
    pub fn limits(&self) -> CheckLimits {
        self.limits
    }

    /// Validates a single text.
    pub fn validate_text(&self, text: &str) -> CheckHandlerResult<()> {
        self.ensure_text_len(None, text)
    }

    /// Validates a bulk request.
    pub fn validate_bulk(&self, texts: &[String]) -> CheckHandlerResult<()> {
        if texts.len() > self.limits.max_bulk_texts {
            return Err(CheckHandlerError::TooManyTexts {
                count: texts.len(),
                max: self.limits.max_bulk_texts,
            });
        }

        for (index, text) in texts.iter().enumerate() {
            self.ensure_text_len(Some(index), text)?;
        }

        Ok(())
    }

    /// Checks a single text.
    pub async fn check(&self, text: &str) -> CheckHandlerResult<CheckResult> {
        self.validate_text(text)?;
        Ok(self.engine.check_one(text).await?)
    }

    /// Checks a batch of texts; results follow input order.
    pub async fn bulk_check(&self, texts: &[String]) -> CheckHandlerResult<Vec<CheckResult>> {
        self.validate_bulk(texts)?;
        debug!(texts = texts.len(), "running bulk check");
        Ok(self.engine.check_many(texts).await?)
    }

    /// Probes the engine without going through the limits.
    pub async fn engine_health(&self) -> DomainResult<()> {
        self.engine.engine().health_check().await
    }

    fn ensure_text_len(&self, index: Option<usize>, text: &str) -> CheckHandlerResult<()> {
        let max = self.limits.max_text_chars;
        // Byte length bounds char count from above
        if text.len() <= max {
            return Ok(());
        }

        let length = text.chars().count();
        if length > max {
            warn!(?index, length, max, "text rejected by length limit");
            return Err(CheckHandlerError::TextTooLong { index, length, max });
        }

        Ok(())
    }
}
