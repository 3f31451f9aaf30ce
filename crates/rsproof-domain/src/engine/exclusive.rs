//! Serialized access to engines that are not safe for concurrent reuse.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::DomainResult;

use super::raw::RawMatch;
use super::traits::GrammarEngine;

/// Wraps an engine so at most one call runs at a time.
///
/// Callers queue on an async mutex; no call is rejected.
pub struct Exclusive<E> {
    inner: Mutex<E>,
}

impl<E> Exclusive<E> {
    pub fn new(engine: E) -> Self {
        Self {
            inner: Mutex::new(engine),
        }
    }

    pub fn into_inner(self) -> E {
        self.inner.into_inner()
    }
}

#[async_trait]
impl<E: GrammarEngine> GrammarEngine for Exclusive<E> {
    async fn analyze(&self, text: &str) -> DomainResult<Vec<RawMatch>> {
        let engine = self.inner.lock().await;
        engine.analyze(text).await
    }

    async fn health_check(&self) -> DomainResult<()> {
        let engine = self.inner.lock().await;
        engine.health_check().await
    }
}
