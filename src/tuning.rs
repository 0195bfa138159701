//! Data-driven game balance
//!
//! Defaults match the live game. A JSON override may replace any subset of
//! fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts;
use crate::persistence::Storage;

/// Errors raised when tuning data is unusable
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Balance constants for progression and the penalty mini-game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Experience needed for one level
    pub experience_to_level: u32,
    /// Experience granted for completing a quest
    pub quest_reward_xp: u32,
    /// Price of a skin in gems
    pub skin_cost_gems: u64,
    /// Probability (0.0 - 1.0) that a penalty kick scores
    pub penalty_goal_chance: f64,
    /// How long a toast stays on screen
    pub notification_ms: u32,
    /// Key of the persisted progress record
    pub storage_key: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            experience_to_level: consts::EXPERIENCE_TO_LEVEL,
            quest_reward_xp: consts::QUEST_REWARD_XP,
            skin_cost_gems: consts::SKIN_COST_GEMS,
            penalty_goal_chance: consts::PENALTY_GOAL_CHANCE,
            notification_ms: consts::NOTIFICATION_MS,
            storage_key: consts::STORAGE_KEY.to_string(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read the override stored under [`consts::TUNING_KEY`].
    ///
    /// A missing, unreadable or invalid override yields the defaults.
    pub fn load_override<S: Storage + ?Sized>(storage: &S) -> Self {
        match storage.get_item(consts::TUNING_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning override: {e}");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Could not read tuning override ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Reject values the progression math cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.experience_to_level == 0 {
            return Err(TuningError::Invalid {
                field: "experience_to_level",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.penalty_goal_chance) {
            return Err(TuningError::Invalid {
                field: "penalty_goal_chance",
                reason: format!("{} is outside 0.0..=1.0", self.penalty_goal_chance),
            });
        }
        if self.storage_key.is_empty() {
            return Err(TuningError::Invalid {
                field: "storage_key",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
