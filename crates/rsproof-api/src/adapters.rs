//! Adapter that bridges the engine client to the domain layer.
//!
//! The domain layer (rsproof-domain) defines the `GrammarEngine` capability
//! and the raw match shape it expects. The engine crate (rsproof-engine)
//! speaks the LanguageTool wire format.
//!
//! This module implements `GrammarEngine` on top of `LanguageToolClient`,
//! converting wire matches into raw matches and client errors into domain
//! errors. LanguageTool's `offset`/`length` are UTF-16 code units, the same
//! unit the domain uses, so spans pass through unchanged.

use async_trait::async_trait;

use rsproof_domain::error::{DomainError, DomainResult};
use rsproof_domain::{GrammarEngine, RawCategory, RawMatch, RawRule};
use rsproof_engine::{EngineError, LanguageToolClient, WireMatch};

/// Adapter that implements `GrammarEngine` using a `LanguageToolClient`.
#[derive(Debug, Clone)]
pub struct LanguageToolEngine {
    client: LanguageToolClient,
}

impl LanguageToolEngine {
    /// Creates a new adapter wrapping the given client.
    pub fn new(client: LanguageToolClient) -> Self {
        Self { client }
    }

    /// Returns the wrapped client.
    pub fn client(&self) -> &LanguageToolClient {
        &self.client
    }
}

#[async_trait]
impl GrammarEngine for LanguageToolEngine {
    async fn analyze(&self, text: &str) -> DomainResult<Vec<RawMatch>> {
        let response = self.client.check(text).await.map_err(into_domain_error)?;

        Ok(response
            .matches
            .into_iter()
            .map(to_raw_match)
            .collect())
    }

    async fn health_check(&self) -> DomainResult<()> {
        self.client.health().await.map_err(into_domain_error)
    }
}

/// Maps a client error onto the domain's engine failure kinds.
fn into_domain_error(err: EngineError) -> DomainError {
    match err {
        EngineError::Timeout { timeout_ms } => DomainError::EngineTimeout {
            duration_ms: timeout_ms,
        },
        rejected @ EngineError::Rejected { .. } => DomainError::TextRejected {
            reason: rejected.to_string(),
        },
        other => DomainError::EngineUnavailable {
            reason: other.to_string(),
        },
    }
}

fn to_raw_match(m: WireMatch) -> RawMatch {
    RawMatch {
        message: m.message,
        short_message: m.short_message,
        from_pos: m.offset,
        to_pos: m.offset.saturating_add(m.length),
        suggested_replacements: Some(m.replacements.into_iter().map(|r| r.value).collect()),
        match_type: m.match_type.type_name,
        rule: RawRule {
            id: m.rule.id,
            sub_id: m.rule.sub_id,
            source_file: m.rule.source_file,
            description: m.rule.description,
            issue_type: m.rule.issue_type,
            category: RawCategory::new(m.rule.category.id, m.rule.category.name),
        },
    }
}
