//! Application state for HTTP handlers.

use std::sync::Arc;

use rsproof_domain::{CheckEngine, GrammarEngine};
use rsproof_server::{CheckHandler, CheckLimits};

/// Application state shared across all HTTP handlers.
///
/// # Type Parameters
///
/// * `E` - The grammar engine behind the warmed-up `CheckEngine`
pub struct AppState<E: GrammarEngine> {
    /// Limit-enforcing check handler.
    pub handler: CheckHandler<E>,
}

impl<E: GrammarEngine> AppState<E> {
    /// Creates the state from an initialized engine handle.
    pub fn new(engine: Arc<CheckEngine<E>>, limits: CheckLimits) -> Self {
        Self {
            handler: CheckHandler::new(engine, limits),
        }
    }
}

impl<E: GrammarEngine> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
        }
    }
}
