//! Player progress: currencies, experience/levels and quests
//!
//! `ProgressStore` is the only thing that mutates progress. It is built once
//! at startup and persists after every accepted change.

pub mod error;
pub mod state;
pub mod store;

pub use error::{ProgressError, Result, parse_amount};
pub use state::{BUILT_IN_QUESTS, Currency, LevelUpResult, PENALTY_QUEST, ProgressState, Quest};
pub use store::{ProgressStore, QuestCompletion};
