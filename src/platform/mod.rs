//! Platform abstraction layer
//!
//! Browser-side implementations of the view contract:
//! - HUD projection onto the page's DOM
//! - Toast notifications
//! - Wall-clock time for seeding

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{DomView, ToastNotifier, now_ms};

/// Native fallback clock (ms since the Unix epoch)
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
