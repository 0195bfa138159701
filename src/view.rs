//! Presentation contract
//!
//! Views only ever see `&ProgressState`. User gestures become [`Intent`]s
//! that an [`IntentDispatcher`] forwards to the store, one at a time, and the
//! dispatcher turns each outcome into a toast message.

use crate::persistence::Storage;
use crate::progress::{
    Currency, LevelUpResult, ProgressError, ProgressState, ProgressStore, QuestCompletion,
    Result, parse_amount,
};
use crate::tuning::Tuning;

/// Display surface that mirrors progress state
pub trait ProgressView {
    /// Called on subscribe and after every persisted mutation
    fn render(&mut self, state: &ProgressState);
}

/// Fire-and-forget toast surface (auto-dismissed by the implementation)
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Notifier that writes toasts to the log (native runs)
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        log::info!("[toast] {message}");
    }
}

/// A user-triggered request to change progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    GrantExperience { amount: u32 },
    CompleteQuest { name: String },
    PurchaseItem { item: String, cost: u64, currency: Currency },
    CreditCurrency { amount: u64, currency: Currency },
    Reset,
}

impl Intent {
    pub fn complete_quest(name: impl Into<String>) -> Self {
        Intent::CompleteQuest { name: name.into() }
    }

    /// Buy a skin at the tuned gem price
    pub fn purchase_skin(skin: impl Into<String>, tuning: &Tuning) -> Self {
        Intent::PurchaseItem {
            item: skin.into(),
            cost: tuning.skin_cost_gems,
            currency: Currency::Gems,
        }
    }

    /// Build a purchase from a shop card's `data-cost` / `data-currency`
    /// attributes. Missing attributes fall back to the tuned skin price in
    /// gems; malformed ones are rejected.
    pub fn purchase_from_attributes(
        item: impl Into<String>,
        cost: Option<&str>,
        currency: Option<&str>,
        tuning: &Tuning,
    ) -> Result<Self> {
        let cost = match cost {
            Some(raw) => parse_amount(raw)?,
            None => tuning.skin_cost_gems,
        };
        let currency = match currency {
            Some(raw) => raw.parse::<Currency>()?,
            None => Currency::Gems,
        };
        Ok(Intent::PurchaseItem {
            item: item.into(),
            cost,
            currency,
        })
    }
}

/// What an accepted intent did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    ExperienceGranted(LevelUpResult),
    QuestCompleted(QuestCompletion),
    Purchased { item: String, remaining: u64 },
    Credited { currency: Currency, balance: u64 },
    Reset,
}

/// Serializes intents into the store and reports outcomes to the player
pub struct IntentDispatcher<S: Storage, N: Notifier> {
    store: ProgressStore<S>,
    notifier: N,
}

impl<S: Storage, N: Notifier> IntentDispatcher<S, N> {
    pub fn new(store: ProgressStore<S>, notifier: N) -> Self {
        Self { store, notifier }
    }

    pub fn state(&self) -> &ProgressState {
        self.store.state()
    }

    pub fn tuning(&self) -> &Tuning {
        self.store.tuning()
    }

    pub fn subscribe(&mut self, view: Box<dyn ProgressView>) {
        self.store.subscribe(view);
    }

    /// Apply one intent synchronously
    pub fn submit(&mut self, intent: Intent) -> Result<IntentOutcome> {
        log::debug!("Intent: {intent:?}");
        let result = self.apply(intent);
        match &result {
            Ok(outcome) => {
                if let Some(message) = success_message(outcome) {
                    self.notifier.notify(&message);
                }
            }
            Err(e) => {
                log::warn!("Intent rejected: {e}");
                self.notifier.notify(&failure_message(e));
            }
        }
        result
    }

    /// Tear down, persisting one last time
    pub fn shutdown(self) {
        self.store.shutdown();
    }

    fn apply(&mut self, intent: Intent) -> Result<IntentOutcome> {
        let outcome = match intent {
            Intent::GrantExperience { amount } => {
                IntentOutcome::ExperienceGranted(self.store.grant_experience(amount)?)
            }
            Intent::CompleteQuest { name } => {
                IntentOutcome::QuestCompleted(self.store.complete_quest(&name)?)
            }
            Intent::PurchaseItem {
                item,
                cost,
                currency,
            } => {
                let remaining = self.store.purchase_item(cost, currency)?;
                IntentOutcome::Purchased { item, remaining }
            }
            Intent::CreditCurrency { amount, currency } => {
                let balance = self.store.credit_currency(amount, currency)?;
                IntentOutcome::Credited { currency, balance }
            }
            Intent::Reset => {
                self.store.reset();
                IntentOutcome::Reset
            }
        };
        Ok(outcome)
    }
}

fn level_up_suffix(result: &LevelUpResult) -> String {
    if result.leveled_up {
        format!(" Новый уровень: {}!", result.level)
    } else {
        String::new()
    }
}

fn success_message(outcome: &IntentOutcome) -> Option<String> {
    match outcome {
        IntentOutcome::ExperienceGranted(result) if result.leveled_up => {
            Some(format!("Новый уровень: {}!", result.level))
        }
        IntentOutcome::ExperienceGranted(_) => None,
        IntentOutcome::QuestCompleted(QuestCompletion {
            newly_completed: true,
            reward,
        }) => Some(format!(
            "Задание выполнено! 🏆{}",
            reward.as_ref().map(level_up_suffix).unwrap_or_default()
        )),
        IntentOutcome::QuestCompleted(_) => Some("Задание уже выполнено".to_string()),
        IntentOutcome::Purchased { item, .. } => Some(format!("Получен скин: {item}")),
        IntentOutcome::Credited { .. } => Some("Награда получена!".to_string()),
        IntentOutcome::Reset => Some("Прогресс сброшен".to_string()),
    }
}

fn failure_message(error: &ProgressError) -> String {
    match error {
        ProgressError::InsufficientFunds {
            required,
            available,
            ..
        } => format!("Недостаточно средств: нужно {required}, есть {available}"),
        ProgressError::NotFound(name) => format!("Задание \"{name}\" не найдено"),
        ProgressError::InvalidArgument(_) => "Действие недоступно".to_string(),
    }
}

/// Text the HUD shows, one field per element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub xp: String,
    pub level: String,
    pub gold: String,
    pub diamonds: String,
    pub green: String,
    /// Quest checkbox states in display order
    pub quests: Vec<(String, bool)>,
}

impl Hud {
    pub fn project(state: &ProgressState, tuning: &Tuning) -> Self {
        Self {
            xp: format!("{}/{}XP", state.experience, tuning.experience_to_level),
            level: state.level.to_string(),
            gold: state.gold.to_string(),
            diamonds: state.gems.to_string(),
            green: state.bonus_currency.to_string(),
            quests: state
                .quests
                .iter()
                .map(|q| (q.name.clone(), q.completed))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::persistence::MemoryStorage;
    use crate::progress::PENALTY_QUEST;

    #[derive(Clone, Default)]
    struct Toasts(Rc<RefCell<Vec<String>>>);

    impl Notifier for Toasts {
        fn notify(&mut self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    struct HudView {
        tuning: Tuning,
        last: Rc<RefCell<Option<Hud>>>,
    }

    impl ProgressView for HudView {
        fn render(&mut self, state: &ProgressState) {
            *self.last.borrow_mut() = Some(Hud::project(state, &self.tuning));
        }
    }

    fn dispatcher() -> (IntentDispatcher<MemoryStorage, Toasts>, Toasts) {
        let toasts = Toasts::default();
        let store = ProgressStore::open(MemoryStorage::new());
        (IntentDispatcher::new(store, toasts.clone()), toasts)
    }

    #[test]
    fn test_hud_projection() {
        let hud = Hud::project(&ProgressState::default(), &Tuning::default());
        assert_eq!(hud.xp, "20/120XP");
        assert_eq!(hud.level, "5");
        assert_eq!(hud.gold, "70000");
        assert_eq!(hud.diamonds, "2150");
        assert_eq!(hud.green, "0");
        assert_eq!(hud.quests[0], (PENALTY_QUEST.to_string(), false));
    }

    #[test]
    fn test_purchase_from_card_attributes() {
        let tuning = Tuning::default();
        let intent =
            Intent::purchase_from_attributes("Neon", Some(" 1200 "), Some("gold"), &tuning)
                .unwrap();
        assert_eq!(
            intent,
            Intent::PurchaseItem {
                item: "Neon".to_string(),
                cost: 1200,
                currency: Currency::Gold,
            }
        );

        let fallback = Intent::purchase_from_attributes("Classic", None, None, &tuning).unwrap();
        assert_eq!(fallback, Intent::purchase_skin("Classic", &tuning));
    }

    #[test]
    fn test_malformed_card_attributes_are_invalid() {
        let tuning = Tuning::default();
        for (cost, currency) in [
            (Some("-500"), None),
            (Some("cheap"), None),
            (None, Some("silver")),
        ] {
            assert!(matches!(
                Intent::purchase_from_attributes("Bad", cost, currency, &tuning),
                Err(ProgressError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_submit_updates_subscribed_view() {
        let (mut dispatcher, _) = dispatcher();
        let last = Rc::new(RefCell::new(None));
        dispatcher.subscribe(Box::new(HudView {
            tuning: Tuning::default(),
            last: last.clone(),
        }));

        dispatcher
            .submit(Intent::complete_quest(PENALTY_QUEST))
            .unwrap();
        let hud = last.borrow().clone().unwrap();
        assert_eq!(hud.xp, "40/120XP");
        assert!(hud.quests[0].1);
    }

    #[test]
    fn test_skin_purchase_toasts() {
        let (mut dispatcher, toasts) = dispatcher();
        let intent = Intent::purchase_skin("Golden Boot", dispatcher.tuning());
        let outcome = dispatcher.submit(intent).unwrap();
        assert_eq!(
            outcome,
            IntentOutcome::Purchased {
                item: "Golden Boot".to_string(),
                remaining: 1650,
            }
        );
        assert_eq!(toasts.0.borrow().as_slice(), ["Получен скин: Golden Boot"]);
    }

    #[test]
    fn test_rejected_intent_toasts_and_keeps_state() {
        let (mut dispatcher, toasts) = dispatcher();
        let before = dispatcher.state().clone();
        let err = dispatcher
            .submit(Intent::PurchaseItem {
                item: "Legend".to_string(),
                cost: 99999,
                currency: Currency::Gems,
            })
            .unwrap_err();
        assert!(matches!(err, ProgressError::InsufficientFunds { .. }));
        assert_eq!(dispatcher.state(), &before);
        assert_eq!(
            toasts.0.borrow().as_slice(),
            ["Недостаточно средств: нужно 99999, есть 2150"]
        );
    }

    #[test]
    fn test_quest_level_up_message() {
        let (mut dispatcher, toasts) = dispatcher();
        dispatcher
            .submit(Intent::GrantExperience { amount: 80 })
            .unwrap();
        // 100 xp now; a 20 xp reward reaches the threshold
        dispatcher
            .submit(Intent::complete_quest(PENALTY_QUEST))
            .unwrap();
        assert_eq!(
            toasts.0.borrow().as_slice(),
            ["Задание выполнено! 🏆 Новый уровень: 6!"]
        );
    }

    #[test]
    fn test_repeat_quest_is_noop() {
        let (mut dispatcher, toasts) = dispatcher();
        dispatcher
            .submit(Intent::complete_quest(PENALTY_QUEST))
            .unwrap();
        let after_once = dispatcher.state().clone();
        let outcome = dispatcher
            .submit(Intent::complete_quest(PENALTY_QUEST))
            .unwrap();
        assert_eq!(
            outcome,
            IntentOutcome::QuestCompleted(QuestCompletion {
                newly_completed: false,
                reward: None,
            })
        );
        assert_eq!(dispatcher.state(), &after_once);
        assert_eq!(toasts.0.borrow().len(), 2);
    }

    #[test]
    fn test_credit_and_reset() {
        let (mut dispatcher, _) = dispatcher();
        let outcome = dispatcher
            .submit(Intent::CreditCurrency {
                amount: 500,
                currency: Currency::Gems,
            })
            .unwrap();
        assert_eq!(
            outcome,
            IntentOutcome::Credited {
                currency: Currency::Gems,
                balance: 2650,
            }
        );
        dispatcher.submit(Intent::Reset).unwrap();
        assert_eq!(dispatcher.state(), &ProgressState::default());
    }

    #[test]
    fn test_unknown_quest_message() {
        let (mut dispatcher, toasts) = dispatcher();
        assert!(dispatcher.submit(Intent::complete_quest("nope")).is_err());
        assert_eq!(
            toasts.0.borrow().as_slice(),
            ["Задание \"nope\" не найдено"]
        );
    }
}
