//! DOM-backed view and toast surface (WASM only)

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlInputElement};

use crate::progress::ProgressState;
use crate::tuning::Tuning;
use crate::view::{Hud, Notifier, ProgressView};

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn set_text(document: &Document, selector: &str, text: &str) {
    if let Some(el) = document.query_selector(selector).ok().flatten() {
        el.set_text_content(Some(text));
    }
}

/// Mirrors progress onto the HUD and the quest list
pub struct DomView {
    tuning: Tuning,
}

impl DomView {
    pub fn new(tuning: Tuning) -> Self {
        Self { tuning }
    }
}

impl ProgressView for DomView {
    fn render(&mut self, state: &ProgressState) {
        let Some(document) = document() else { return };
        let hud = Hud::project(state, &self.tuning);

        set_text(&document, ".xp", &hud.xp);
        set_text(&document, ".level", &hud.level);
        set_text(&document, ".currency.gold", &hud.gold);
        set_text(&document, ".currency.diamond", &hud.diamonds);
        set_text(&document, ".currency.green", &hud.green);

        // Quest items are laid out in the same order as the built-in list
        let Ok(items) = document.query_selector_all(".quest-item") else {
            return;
        };
        for (index, (_, completed)) in hud.quests.iter().enumerate() {
            let checkbox = items
                .get(index as u32)
                .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
                .and_then(|item| item.query_selector("input[type=\"checkbox\"]").ok().flatten())
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
            if let Some(checkbox) = checkbox {
                checkbox.set_checked(*completed);
            }
        }
    }
}

/// Shows a message in the page's `.notification` element, then hides it
pub struct ToastNotifier {
    duration_ms: i32,
}

impl ToastNotifier {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms: i32::try_from(duration_ms).unwrap_or(i32::MAX),
        }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&mut self, message: &str) {
        let Some(window) = web_sys::window() else { return };
        let Some(el) = window
            .document()
            .and_then(|d| d.query_selector(".notification").ok().flatten())
        else {
            log::info!("[toast] {message}");
            return;
        };

        el.set_text_content(Some(message));
        let _ = el.class_list().add_1("show");

        let closure = Closure::once(move || {
            let _ = el.class_list().remove_1("show");
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            self.duration_ms,
        );
        closure.forget();
    }
}
