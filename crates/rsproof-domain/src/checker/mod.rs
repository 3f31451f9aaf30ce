//! Check engine: the warmed-up handle serving single and bulk checks.
//!
//! # Lifecycle
//!
//! A [`CheckEngine`] can only be obtained through [`CheckEngine::init`],
//! which runs one throwaway analysis before returning. Lazy engine loading
//! (dictionaries, rule compilation) therefore happens at startup, and the
//! handle handed to the request layer is always warm.
//!
//! # Bulk checks
//!
//! Each text of a bulk check is an independent unit of work. Up to
//! `max_concurrency` texts run at once; results are collected in input
//! order, not completion order. The first failure aborts the whole batch
//! and no partial result list is produced.

mod config;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, error, info, warn};

use crate::engine::GrammarEngine;
use crate::error::{DomainError, DomainResult, MappingError};
use crate::result::{map_match, CheckResult, RuleMatchResult};

pub use config::CheckEngineConfig;

/// Sentinel text analyzed once during [`CheckEngine::init`].
pub const WARM_UP_TEXT: &str = "Initialize";

/// Warmed-up handle to a grammar engine configured for one language.
pub struct CheckEngine<E: GrammarEngine> {
    engine: Arc<E>,
    config: CheckEngineConfig,
}

impl<E: GrammarEngine> CheckEngine<E> {
    /// Warms up `engine` and returns the handle ready to serve checks.
    ///
    /// Must run once during startup, before any route reaching the handle
    /// is registered. A failure here means the engine cannot serve traffic.
    pub async fn init(engine: Arc<E>, config: CheckEngineConfig) -> DomainResult<Self> {
        let start = Instant::now();

        if let Err(e) = engine.analyze(WARM_UP_TEXT).await {
            error!(error = %e, "grammar engine warm-up failed");
            return Err(DomainError::EngineUnavailable {
                reason: format!("warm-up check failed: {e}"),
            });
        }

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            max_concurrency = config.max_concurrency,
            "grammar engine warmed up"
        );

        Ok(Self { engine, config })
    }

    /// Returns the wrapped engine.
    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &CheckEngineConfig {
        &self.config
    }

    /// Checks a single text.
    ///
    /// The returned result echoes `text` unchanged and lists matches in the
    /// engine's reporting order. An empty text yields no matches.
    pub async fn check_one(&self, text: &str) -> DomainResult<CheckResult> {
        if text.is_empty() {
            return Ok(CheckResult::clean(text));
        }

        let start = Instant::now();
        let raw_matches = self.engine.analyze(text).await?;
        let text_len = text.encode_utf16().count();

        let matches = raw_matches
            .into_iter()
            .map(|raw| {
                let mapped = map_match(raw)?;
                ensure_within_text(&mapped, text_len)?;
                Ok(mapped)
            })
            .collect::<Result<Vec<_>, MappingError>>()
            .map_err(|e| {
                error!(error = %e, "engine reported a match outside the result contract");
                DomainError::from(e)
            })?;

        debug!(
            text_len,
            matches = matches.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "text checked"
        );

        Ok(CheckResult {
            text: text.to_owned(),
            matches,
        })
    }

    /// Checks every text independently; `result[i]` belongs to `texts[i]`.
    pub async fn check_many(&self, texts: &[String]) -> DomainResult<Vec<CheckResult>> {
        let limit = self.config.max_concurrency.max(1);
        let total = texts.len();

        // Owned items keep the buffered future Send for handlers
        stream::iter(texts.iter().cloned().enumerate())
            .map(|(index, text)| async move {
                self.check_one(&text).await.map_err(|e| {
                    warn!(index, total, error = %e, "bulk check aborted");
                    e
                })
            })
            .buffered(limit)
            .try_collect()
            .await
    }
}

/// Rejects matches reaching past the end of the checked text.
///
/// `text_len` is in UTF-16 code units, the unit engine offsets use.
fn ensure_within_text(m: &RuleMatchResult, text_len: usize) -> Result<(), MappingError> {
    let within = m
        .offset
        .checked_add(m.length)
        .is_some_and(|end| end <= text_len);

    if within {
        Ok(())
    } else {
        Err(MappingError::SpanOutOfBounds {
            rule_id: m.rule.id.clone(),
            offset: m.offset,
            length: m.length,
            text_len,
        })
    }
}
