//! Check handler enforcing gateway limits.
//!
//! The check engine accepts any text and any number of texts. Requests
//! arriving over the network are bounded here first, so a single caller
//! cannot tie up the engine with an oversized batch or document:
//!
//! 1. **Batch size**: at most `max_bulk_texts` texts per bulk check
//! 2. **Text size**: at most `max_text_chars` characters per text
//!
//! Validation happens before any text reaches the engine. A rejected
//! bulk check does no engine work at all.

mod handler;
mod types;

pub use handler::CheckHandler;
pub use types::{CheckHandlerError, CheckHandlerResult, CheckLimits};
