//! FC Web - football casual game core
//!
//! Core modules:
//! - `progress`: Currencies, experience/levels and quests, with persistence
//! - `view`: Presentation contract and intent dispatch
//! - `penalty`: Penalty-kick outcomes
//! - `persistence`: Keyed record storage (LocalStorage on web)
//! - `platform`: Browser DOM views and toasts
//! - `tuning`: Data-driven game balance

pub mod penalty;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod tuning;
pub mod view;

pub use progress::{Currency, ProgressError, ProgressState, ProgressStore};
pub use tuning::Tuning;
pub use view::{Intent, IntentDispatcher, ProgressView};

/// Game configuration constants
pub mod consts {
    /// Experience needed to gain one level
    pub const EXPERIENCE_TO_LEVEL: u32 = 120;
    /// Experience reward for any quest
    pub const QUEST_REWARD_XP: u32 = 20;
    /// Skin price in gems
    pub const SKIN_COST_GEMS: u64 = 500;

    /// First-run progress
    pub const START_EXPERIENCE: u32 = 20;
    pub const START_LEVEL: u32 = 5;
    pub const START_GOLD: u64 = 70_000;
    pub const START_GEMS: u64 = 2_150;

    /// Probability that a penalty kick scores
    pub const PENALTY_GOAL_CHANCE: f64 = 0.7;

    /// Toast auto-dismiss delay
    pub const NOTIFICATION_MS: u32 = 3_000;

    /// LocalStorage key of the progress record
    pub const STORAGE_KEY: &str = "fcGameState";
    /// LocalStorage key of an optional balance override (JSON)
    pub const TUNING_KEY: &str = "fcTuning";
}
