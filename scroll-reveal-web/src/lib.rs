//! Browser binding for the `scroll-reveal` crate.
//!
//! `scroll-reveal` is platform-agnostic; this crate implements its host traits over
//! `window.document` and the platform `IntersectionObserver`, and exposes:
//!
//! - [`watch`] / [`watch_many`] for Rust callers
//! - `watch` / `watchMany` / `initLogging` exports for JavaScript callers
//!
//! Outside a DOM, or when `IntersectionObserver` is missing, every watch degrades to "no
//! handle" instead of failing.
#![forbid(unsafe_code)]

mod host;
mod js;

pub use host::{WebElement, WebHost, WebObserver};
pub use js::{JsWatcher, init_logging, watch_js, watch_many_js};

pub use scroll_reveal::{RevealOptions, RevealOverrides, WatchEntry, Watcher};

use wasm_bindgen::JsValue;

/// Watches `selector` in the current document.
///
/// Returns `Ok(None)` without a document or `IntersectionObserver`. Selector and option errors
/// raised by the browser are returned unmodified.
pub fn watch(
    selector: &str,
    overrides: Option<&RevealOverrides>,
) -> Result<Option<Watcher<WebObserver>>, JsValue> {
    let Some(host) = WebHost::current() else {
        tracing::debug!(selector, "watch: no document");
        return Ok(None);
    };
    scroll_reveal::watch(&host, selector, overrides)
}

/// Watches every entry in the current document, keeping created watchers in input order.
pub fn watch_many(entries: &[WatchEntry]) -> Result<Vec<Watcher<WebObserver>>, JsValue> {
    let Some(host) = WebHost::current() else {
        tracing::debug!(entries = entries.len(), "watch_many: no document");
        return Ok(Vec::new());
    };
    scroll_reveal::watch_many(&host, entries)
}
