//! Progress state and its persisted layout
//!
//! Field names on disk follow the record the game has always written
//! (`xp`, `diamonds`, `green`) so existing saves keep loading.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ProgressError;
use crate::consts;

/// Quests every player has, in display order
pub const BUILT_IN_QUESTS: [&str; 2] = ["Забей пенальти", "Выиграй 3 матча"];

/// Name of the quest a scored penalty completes
pub const PENALTY_QUEST: &str = BUILT_IN_QUESTS[0];

/// The three balances a player holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// Soft currency
    Gold,
    /// Hard currency ("diamonds")
    Gems,
    /// Tertiary currency ("green")
    Bonus,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Gold, Currency::Gems, Currency::Bonus];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Gold => "gold",
            Currency::Gems => "gems",
            Currency::Bonus => "bonus",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = ProgressError;

    /// Accepts both the API names and the CSS class names the page uses
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gold" => Ok(Currency::Gold),
            "gems" | "gem" | "diamond" | "diamonds" => Ok(Currency::Gems),
            "bonus" | "green" => Ok(Currency::Bonus),
            other => Err(ProgressError::InvalidArgument(format!(
                "unknown currency `{other}`"
            ))),
        }
    }
}

/// A quest and whether it has been completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    pub completed: bool,
}

impl Quest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            completed: false,
        }
    }
}

/// Outcome of an experience grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpResult {
    pub leveled_up: bool,
    /// Thresholds crossed by this grant (usually 0 or 1)
    pub levels_gained: u32,
    pub level: u32,
    pub experience: u32,
}

/// Complete player progress (serializable, one record)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Experience toward the next level (always below the threshold)
    #[serde(rename = "xp")]
    pub experience: u32,
    /// Player level (1-based)
    pub level: u32,
    /// Soft currency
    pub gold: u64,
    /// Hard currency
    #[serde(rename = "diamonds")]
    pub gems: u64,
    /// Tertiary currency
    #[serde(rename = "green")]
    pub bonus_currency: u64,
    /// Quest flags; older records were saved without them
    #[serde(default)]
    pub quests: Vec<Quest>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            experience: consts::START_EXPERIENCE,
            level: consts::START_LEVEL,
            gold: consts::START_GOLD,
            gems: consts::START_GEMS,
            bonus_currency: 0,
            quests: BUILT_IN_QUESTS.iter().map(|name| Quest::new(*name)).collect(),
        }
    }
}

impl ProgressState {
    /// First-run state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance of `currency`
    pub fn balance(&self, currency: Currency) -> u64 {
        match currency {
            Currency::Gold => self.gold,
            Currency::Gems => self.gems,
            Currency::Bonus => self.bonus_currency,
        }
    }

    pub(crate) fn balance_mut(&mut self, currency: Currency) -> &mut u64 {
        match currency {
            Currency::Gold => &mut self.gold,
            Currency::Gems => &mut self.gems,
            Currency::Bonus => &mut self.bonus_currency,
        }
    }

    /// Look up a quest by name
    pub fn quest(&self, name: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.name == name)
    }

    pub(crate) fn quest_mut(&mut self, name: &str) -> Option<&mut Quest> {
        self.quests.iter_mut().find(|q| q.name == name)
    }

    /// Experience conserved across levels (`level * threshold + experience`)
    pub fn total_experience(&self, experience_to_level: u32) -> u64 {
        self.level as u64 * experience_to_level as u64 + self.experience as u64
    }

    /// Whether the record satisfies the progression invariants
    pub fn is_valid(&self, experience_to_level: u32) -> bool {
        if self.level == 0 || self.experience >= experience_to_level {
            return false;
        }
        self.quests
            .iter()
            .enumerate()
            .all(|(i, q)| self.quests[..i].iter().all(|other| other.name != q.name))
    }

    /// Rebuild the quest list from the built-in list, keeping completion
    /// flags of quests the record already knew about.
    pub fn reconcile_quests(&mut self) {
        let quests = BUILT_IN_QUESTS
            .iter()
            .map(|name| Quest {
                name: name.to_string(),
                completed: self.quest(name).is_some_and(|q| q.completed),
            })
            .collect();
        self.quests = quests;
    }

    /// Add experience, converting every full threshold into a level.
    ///
    /// Returns `None` (state untouched) if the level would overflow or the
    /// threshold is zero.
    pub(crate) fn add_experience(
        &mut self,
        amount: u32,
        experience_to_level: u32,
    ) -> Option<LevelUpResult> {
        let threshold = experience_to_level as u64;
        let pooled = self.experience as u64 + amount as u64;
        let levels_gained = u32::try_from(pooled.checked_div(threshold)?).ok()?;
        let level = self.level.checked_add(levels_gained)?;

        self.level = level;
        // Remainder is below the threshold, which fits in u32
        self.experience = (pooled % threshold) as u32;

        Some(LevelUpResult {
            leveled_up: levels_gained > 0,
            levels_gained,
            level: self.level,
            experience: self.experience,
        })
    }
}
