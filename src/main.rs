//! FC Web entry point
//!
//! Handles platform-specific initialization and wires page gestures to
//! progress intents.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, MouseEvent};

    use fc_web::penalty::{KickType, PenaltyShootout};
    use fc_web::persistence::{LocalStorage, MemoryStorage, Storage};
    use fc_web::platform::{DomView, ToastNotifier, now_ms};
    use fc_web::progress::{BUILT_IN_QUESTS, ProgressStore};
    use fc_web::{Intent, IntentDispatcher, Tuning};

    type Dispatcher = IntentDispatcher<Box<dyn Storage>, ToastNotifier>;

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("🎮 FC Web 25 starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, nothing to wire");
            return;
        };

        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{e}; progress will not survive a reload");
                Box::new(MemoryStorage::new())
            }
        };

        let tuning = Tuning::load_override(&storage);
        let store = match ProgressStore::with_tuning(storage, tuning.clone()) {
            Ok(store) => store,
            Err(e) => {
                log::error!("Unusable tuning: {e}");
                return;
            }
        };
        let notifier = ToastNotifier::new(tuning.notification_ms);
        let dispatcher = Rc::new(RefCell::new(IntentDispatcher::new(store, notifier)));
        dispatcher
            .borrow_mut()
            .subscribe(Box::new(DomView::new(tuning.clone())));

        let seed = now_ms() as u64;
        let shootout = Rc::new(RefCell::new(PenaltyShootout::new(
            seed,
            tuning.penalty_goal_chance,
        )));
        log::info!("Penalty shootout seeded with {}", seed);

        setup_navigation(&document);
        setup_events_screen(&document, dispatcher.clone(), &tuning);
        setup_penalty_screen(&document, dispatcher, shootout);

        show_screen(&document, "start-screen");
        log::info!("FC Web running!");
    }

    fn show_screen(document: &Document, screen_id: &str) {
        if let Ok(screens) = document.query_selector_all(".screen") {
            for i in 0..screens.length() {
                if let Some(screen) = screens.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    let _ = screen.class_list().remove_1("active");
                }
            }
        }
        if let Some(screen) = document.get_element_by_id(screen_id) {
            let _ = screen.class_list().add_1("active");
        }
    }

    fn on_click(el: &Element, mut handler: impl FnMut() + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn each_match(document: &Document, selector: &str, mut f: impl FnMut(u32, Element)) {
        let Ok(nodes) = document.query_selector_all(selector) else {
            return;
        };
        for i in 0..nodes.length() {
            if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                f(i, el);
            }
        }
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn submit(dispatcher: &Rc<RefCell<Dispatcher>>, intent: Intent) {
        // Outcome messaging goes through the toast surface
        let _ = dispatcher.borrow_mut().submit(intent);
    }

    fn setup_navigation(document: &Document) {
        if let Some(start) = document.get_element_by_id("start-screen") {
            on_click(&start, || {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    show_screen(&document, "main-menu");
                }
            });
        }

        if let Some(back) = document.get_element_by_id("btn-penalty-back") {
            on_click(&back, || {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    show_screen(&document, "mode-select");
                }
            });
        }

        each_match(document, ".menu-button", |_, button| {
            let label = button.text_content().unwrap_or_default();
            on_click(&button, move || alert(&format!("{} пока недоступен.", label.trim())));
        });
    }

    fn setup_events_screen(
        document: &Document,
        dispatcher: Rc<RefCell<Dispatcher>>,
        tuning: &Tuning,
    ) {
        each_match(document, "#events-screen .skin-card button", |index, button| {
            let card = button.closest(".skin-card").ok().flatten();
            let attr = |name: &str| card.as_ref().and_then(|c| c.get_attribute(name));
            let skin = attr("data-skin").unwrap_or_else(|| "Скин".to_string());
            let cost = attr("data-cost");
            let currency = attr("data-currency");
            let intent = match Intent::purchase_from_attributes(
                skin,
                cost.as_deref(),
                currency.as_deref(),
                tuning,
            ) {
                Ok(intent) => intent,
                Err(e) => {
                    log::warn!("Skin card #{index} not bound: {e}");
                    return;
                }
            };
            let dispatcher = dispatcher.clone();
            on_click(&button, move || submit(&dispatcher, intent.clone()));
        });

        each_match(document, "#events-screen .quest-item button", |index, button| {
            let quest = button
                .closest(".quest-item")
                .ok()
                .flatten()
                .and_then(|item| item.get_attribute("data-quest"))
                .or_else(|| BUILT_IN_QUESTS.get(index as usize).map(|q| q.to_string()));
            let Some(quest) = quest else {
                log::warn!("Quest button #{index} has no quest");
                return;
            };
            let dispatcher = dispatcher.clone();
            on_click(&button, move || {
                submit(&dispatcher, Intent::complete_quest(quest.clone()))
            });
        });
    }

    fn setup_penalty_screen(
        document: &Document,
        dispatcher: Rc<RefCell<Dispatcher>>,
        shootout: Rc<RefCell<PenaltyShootout>>,
    ) {
        for id in ["btn-quiet", "btn-cavadinha", "btn-super-kick"] {
            let (Some(button), Some(kick)) =
                (document.get_element_by_id(id), KickType::from_button_id(id))
            else {
                continue;
            };
            let dispatcher = dispatcher.clone();
            let shootout = shootout.clone();
            on_click(&button, move || {
                let outcome = shootout.borrow_mut().take_kick(kick);
                alert(outcome.message());
                if let Some(intent) = outcome.intent() {
                    submit(&dispatcher, intent);
                }
            });
        }

        if let Some(button) = document.get_element_by_id("btn-replace") {
            on_click(&button, || alert("Игрок заменён."));
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fc_web::penalty::{KickType, PenaltyShootout};
    use fc_web::persistence::MemoryStorage;
    use fc_web::platform::now_ms;
    use fc_web::view::{Hud, LogNotifier};
    use fc_web::{Intent, IntentDispatcher, ProgressState, ProgressStore, ProgressView, Tuning};

    struct LogView(Tuning);

    impl ProgressView for LogView {
        fn render(&mut self, state: &ProgressState) {
            let hud = Hud::project(state, &self.0);
            log::info!(
                "HUD: lvl {} | {} | gold {} | diamonds {} | green {}",
                hud.level,
                hud.xp,
                hud.gold,
                hud.diamonds,
                hud.green
            );
        }
    }

    env_logger::init();
    log::info!("FC Web (native) starting...");
    log::info!("Native mode keeps progress in memory - run with `trunk serve` for the web version");

    let storage = MemoryStorage::new();
    let tuning = Tuning::load_override(&storage);
    let store = match ProgressStore::with_tuning(storage, tuning.clone()) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Unusable tuning: {e}");
            return;
        }
    };
    let mut dispatcher = IntentDispatcher::new(store, LogNotifier);
    dispatcher.subscribe(Box::new(LogView(tuning.clone())));

    let mut shootout = PenaltyShootout::new(now_ms() as u64, tuning.penalty_goal_chance);
    for kick in [KickType::Quiet, KickType::Cavadinha, KickType::SuperKick] {
        let outcome = shootout.take_kick(kick);
        println!("{}: {}", kick.as_str(), outcome.message());
        if let Some(intent) = outcome.intent() {
            let _ = dispatcher.submit(intent);
        }
    }

    let _ = dispatcher.submit(Intent::purchase_skin("Classic", &tuning));
    println!("{}/{} goals", shootout.goals, shootout.attempts);
    dispatcher.shutdown();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
