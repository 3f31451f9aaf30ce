//! External grammar engine abstraction.
//!
//! The rest of the system depends on [`GrammarEngine`] only; concrete
//! engines live in other crates and are bridged in through adapters.

mod exclusive;
mod raw;
mod traits;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use exclusive::Exclusive;
pub use raw::{RawCategory, RawMatch, RawRule};
pub use traits::{GrammarEngine, HEALTH_CHECK_TEXT};
