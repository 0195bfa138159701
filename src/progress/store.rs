//! The single owner of player progress
//!
//! Every mutation is applied to a copy, committed, persisted and only then
//! shown to subscribed views. A rejected operation never touches the state.

use super::error::{ProgressError, Result};
use super::state::{Currency, LevelUpResult, ProgressState};
use crate::persistence::Storage;
use crate::tuning::{Tuning, TuningError};
use crate::view::ProgressView;

/// Result of a quest completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestCompletion {
    /// False when the quest was already completed (nothing changed)
    pub newly_completed: bool,
    /// Experience outcome of the reward, if one was granted
    pub reward: Option<LevelUpResult>,
}

/// Owns the canonical [`ProgressState`] and its persisted record
pub struct ProgressStore<S: Storage> {
    storage: S,
    tuning: Tuning,
    state: ProgressState,
    views: Vec<Box<dyn ProgressView>>,
}

impl<S: Storage> ProgressStore<S> {
    /// Open the store with default tuning, loading any persisted record
    pub fn open(storage: S) -> Self {
        Self::open_validated(storage, Tuning::default())
    }

    /// Open the store with explicit tuning, rejecting unusable values
    pub fn with_tuning(storage: S, tuning: Tuning) -> std::result::Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::open_validated(storage, tuning))
    }

    fn open_validated(storage: S, tuning: Tuning) -> Self {
        let mut store = Self {
            storage,
            tuning,
            state: ProgressState::default(),
            views: Vec::new(),
        };
        store.state = store.load();
        store
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Read the persisted record.
    ///
    /// Missing, unparsable or invariant-violating data yields the first-run
    /// state. Never fails.
    pub fn load(&self) -> ProgressState {
        let key = &self.tuning.storage_key;
        let json = match self.storage.get_item(key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No saved progress, starting fresh");
                return ProgressState::default();
            }
            Err(e) => {
                log::warn!("Could not read saved progress ({e}), starting fresh");
                return ProgressState::default();
            }
        };

        let mut state = match serde_json::from_str::<ProgressState>(&json) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Discarding malformed progress record: {e}");
                return ProgressState::default();
            }
        };

        if !state.is_valid(self.tuning.experience_to_level) {
            log::warn!("Discarding progress record that violates invariants");
            return ProgressState::default();
        }

        state.reconcile_quests();
        log::info!(
            "Loaded progress (level {}, {} xp)",
            state.level,
            state.experience
        );
        state
    }

    /// Overwrite the persisted record with `state`.
    ///
    /// Storage is treated as always available: a failed write is logged and
    /// the in-memory state stays authoritative.
    pub fn save(&self, state: &ProgressState) {
        let json = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize progress: {e}");
                return;
            }
        };
        match self.storage.set_item(&self.tuning.storage_key, &json) {
            Ok(()) => log::debug!("Progress saved (level {})", state.level),
            Err(e) => log::warn!("Progress not saved: {e}"),
        }
    }

    /// Register a view; it is rendered right away with the current state
    pub fn subscribe(&mut self, mut view: Box<dyn ProgressView>) {
        view.render(&self.state);
        self.views.push(view);
    }

    /// Add experience, levelling up for every full threshold reached
    pub fn grant_experience(&mut self, amount: u32) -> Result<LevelUpResult> {
        let mut next = self.state.clone();
        let result = next
            .add_experience(amount, self.tuning.experience_to_level)
            .ok_or_else(|| {
                ProgressError::InvalidArgument(format!("{amount} xp would overflow the level"))
            })?;
        if result.leveled_up {
            log::info!("Level up! Now level {}", result.level);
        }
        self.commit(next);
        Ok(result)
    }

    /// Mark a quest completed and grant its reward once.
    ///
    /// Completing an already completed quest succeeds without changes.
    pub fn complete_quest(&mut self, name: &str) -> Result<QuestCompletion> {
        let quest = self
            .state
            .quest(name)
            .ok_or_else(|| ProgressError::NotFound(name.to_string()))?;
        if quest.completed {
            log::debug!("Quest \"{name}\" already completed");
            return Ok(QuestCompletion {
                newly_completed: false,
                reward: None,
            });
        }

        let mut next = self.state.clone();
        let reward = next
            .add_experience(self.tuning.quest_reward_xp, self.tuning.experience_to_level)
            .ok_or_else(|| {
                ProgressError::InvalidArgument("quest reward would overflow the level".to_string())
            })?;
        if let Some(quest) = next.quest_mut(name) {
            quest.completed = true;
        }

        log::info!("Quest \"{name}\" completed");
        self.commit(next);
        Ok(QuestCompletion {
            newly_completed: true,
            reward: Some(reward),
        })
    }

    /// Spend `cost` of `currency`. Returns the remaining balance.
    pub fn purchase_item(&mut self, cost: u64, currency: Currency) -> Result<u64> {
        let available = self.state.balance(currency);
        let remaining = available
            .checked_sub(cost)
            .ok_or(ProgressError::InsufficientFunds {
                currency,
                required: cost,
                available,
            })?;

        let mut next = self.state.clone();
        *next.balance_mut(currency) = remaining;
        log::info!("Spent {cost} {currency}, {remaining} left");
        self.commit(next);
        Ok(remaining)
    }

    /// Add `amount` of `currency`. Returns the new balance.
    pub fn credit_currency(&mut self, amount: u64, currency: Currency) -> Result<u64> {
        let balance = self
            .state
            .balance(currency)
            .checked_add(amount)
            .ok_or_else(|| {
                ProgressError::InvalidArgument(format!("crediting {amount} {currency} overflows"))
            })?;

        let mut next = self.state.clone();
        *next.balance_mut(currency) = balance;
        log::info!("Credited {amount} {currency}");
        self.commit(next);
        Ok(balance)
    }

    /// Forget saved progress and start over from the first-run state
    ///
    /// If the record cannot be removed it is overwritten with the first-run
    /// state instead, so a reload never brings the old progress back.
    pub fn reset(&mut self) {
        self.state = ProgressState::default();
        if let Err(e) = self.storage.remove_item(&self.tuning.storage_key) {
            log::warn!("Saved progress not cleared ({e}), overwriting it");
            self.save(&self.state);
        }
        log::info!("Progress reset");
        self.notify();
    }

    /// Final persist at program end
    pub fn shutdown(self) {
        self.save(&self.state);
        log::info!("Progress store closed");
    }

    fn commit(&mut self, next: ProgressState) {
        self.state = next;
        self.save(&self.state);
        self.notify();
    }

    fn notify(&mut self) {
        for view in &mut self.views {
            view.render(&self.state);
        }
    }
}
