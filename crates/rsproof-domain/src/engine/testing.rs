//! Scripted in-memory engine for tests.
//!
//! Available in this crate's tests and, through the `test-util` feature, to
//! downstream crates that need a deterministic engine.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{DomainError, DomainResult};

use super::raw::{RawCategory, RawMatch, RawRule};
use super::traits::GrammarEngine;

/// Engine returning canned matches per text.
///
/// Texts without a scripted response produce no matches. Texts registered
/// with [`failing_on`](Self::failing_on) fail with `EngineUnavailable`.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    responses: HashMap<String, Vec<RawMatch>>,
    failing: HashSet<String>,
    unhealthy: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the matches returned for `text`.
    pub fn with_response(mut self, text: impl Into<String>, matches: Vec<RawMatch>) -> Self {
        self.responses.insert(text.into(), matches);
        self
    }

    /// Makes every analysis of `text` fail.
    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.failing.insert(text.into());
        self
    }

    /// Flips the result of `health_check`.
    pub fn set_healthy(&self, healthy: bool) {
        self.unhealthy.store(!healthy, Ordering::SeqCst);
    }

    /// Texts analyzed so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GrammarEngine for ScriptedEngine {
    async fn analyze(&self, text: &str) -> DomainResult<Vec<RawMatch>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(text.to_string());
        }

        if self.failing.contains(text) {
            return Err(DomainError::EngineUnavailable {
                reason: format!("scripted failure for text of {} chars", text.chars().count()),
            });
        }

        Ok(self.responses.get(text).cloned().unwrap_or_default())
    }

    async fn health_check(&self) -> DomainResult<()> {
        if self.unhealthy.load(Ordering::SeqCst) {
            return Err(DomainError::EngineUnavailable {
                reason: "scripted health check failure".to_string(),
            });
        }
        Ok(())
    }
}

/// The agreement error flagged in `"He go to school."`.
pub fn subject_verb_agreement() -> RawMatch {
    RawMatch::new(
        3,
        5,
        "The verb form does not agree with the subject. Did you mean <suggestion>goes</suggestion>?",
        "Hint",
        RawRule::new(
            "SUBJECT_VERB_AGREEMENT",
            "Subject-verb agreement",
            "grammar",
            RawCategory::new("GRAMMAR", "Grammar"),
        ),
    )
    .with_short_message("Grammatical problem")
    .with_replacements(["goes"])
}

/// A misspelling covering `from..to`.
pub fn misspelling(from: usize, to: usize, suggestion: &str) -> RawMatch {
    RawMatch::new(
        from,
        to,
        "Possible spelling mistake found.",
        "UnknownWord",
        RawRule::new(
            "MORFOLOGIK_RULE_EN_US",
            "Possible spelling mistake",
            "misspelling",
            RawCategory::new("TYPOS", "Possible Typo"),
        ),
    )
    .with_replacements([suggestion])
}
