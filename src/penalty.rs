//! Penalty-kick mini-game rules
//!
//! Only the outcome of a kick lives here; the ball flight and the stadium
//! are drawn by the page. Outcomes come from a seeded PCG stream so a
//! shootout can be replayed from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::progress::PENALTY_QUEST;
use crate::view::Intent;

/// Kick styles offered on the penalty screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KickType {
    Quiet,
    Cavadinha,
    SuperKick,
}

impl KickType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KickType::Quiet => "Quiet",
            KickType::Cavadinha => "Cavadinha",
            KickType::SuperKick => "Super Kick",
        }
    }

    /// Map a button id from the penalty screen to a kick
    pub fn from_button_id(id: &str) -> Option<Self> {
        match id {
            "btn-quiet" => Some(KickType::Quiet),
            "btn-cavadinha" => Some(KickType::Cavadinha),
            "btn-super-kick" => Some(KickType::SuperKick),
            _ => None,
        }
    }
}

/// Result of a single kick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KickOutcome {
    Goal,
    Miss,
}

impl KickOutcome {
    /// Progress change a kick earns, if any
    pub fn intent(&self) -> Option<Intent> {
        match self {
            KickOutcome::Goal => Some(Intent::complete_quest(PENALTY_QUEST)),
            KickOutcome::Miss => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            KickOutcome::Goal => "ГОООООЛ! 🎉",
            KickOutcome::Miss => "Промах! 😢",
        }
    }
}

/// A running penalty session
#[derive(Debug, Clone)]
pub struct PenaltyShootout {
    seed: u64,
    rng: Pcg32,
    goal_chance: f64,
    pub attempts: u32,
    pub goals: u32,
}

impl PenaltyShootout {
    /// `goal_chance` is clamped to 0.0..=1.0
    pub fn new(seed: u64, goal_chance: f64) -> Self {
        let goal_chance = if goal_chance.is_nan() {
            0.0
        } else {
            goal_chance.clamp(0.0, 1.0)
        };
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            goal_chance,
            attempts: 0,
            goals: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Resolve one kick. Every style currently has the same odds.
    pub fn take_kick(&mut self, kick: KickType) -> KickOutcome {
        self.attempts += 1;
        let outcome = if self.rng.random_bool(self.goal_chance) {
            self.goals += 1;
            KickOutcome::Goal
        } else {
            KickOutcome::Miss
        };
        log::info!("Kick: {} -> {:?}", kick.as_str(), outcome);
        outcome
    }
}
