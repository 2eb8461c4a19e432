use std::sync::Once;

use js_sys::Array;
use scroll_reveal::{RevealOverrides, WatchEntry, Watcher};
use wasm_bindgen::prelude::*;
use web_sys::IntersectionObserver;

use crate::WebObserver;

/// A watcher handle exported to JavaScript.
#[wasm_bindgen]
pub struct JsWatcher {
    inner: Watcher<WebObserver>,
}

#[wasm_bindgen]
impl JsWatcher {
    /// The underlying `IntersectionObserver`, shared by all matched elements.
    #[wasm_bindgen(getter)]
    pub fn observer(&self) -> IntersectionObserver {
        self.inner.observer().raw().clone()
    }

    #[wasm_bindgen(getter)]
    pub fn selector(&self) -> String {
        self.inner.selector().to_string()
    }

    #[wasm_bindgen(getter, js_name = observedCount)]
    pub fn observed_count(&self) -> usize {
        self.inner.observed_count()
    }

    pub fn disconnect(&self) {
        self.inner.disconnect();
    }
}

impl From<Watcher<WebObserver>> for JsWatcher {
    fn from(inner: Watcher<WebObserver>) -> Self {
        Self { inner }
    }
}

fn overrides_from(value: JsValue) -> Result<Option<RevealOverrides>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(JsValue::from)
}

/// `watch(selector, options?)`; returns `undefined` when observation is unavailable.
#[wasm_bindgen(js_name = watch)]
pub fn watch_js(selector: &str, options: JsValue) -> Result<Option<JsWatcher>, JsValue> {
    let overrides = overrides_from(options)?;
    Ok(crate::watch(selector, overrides.as_ref())?.map(JsWatcher::from))
}

/// `watchMany([{ selector, options? }, ...])`; returns only the created watchers.
#[wasm_bindgen(js_name = watchMany)]
pub fn watch_many_js(entries: JsValue) -> Result<Array, JsValue> {
    let entries: Vec<WatchEntry> = serde_wasm_bindgen::from_value(entries)?;
    Ok(crate::watch_many(&entries)?
        .into_iter()
        .map(|w| JsValue::from(JsWatcher::from(w)))
        .collect())
}

/// Routes `tracing` events to the browser console and installs the panic hook.
///
/// Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    static INIT: Once = Once::new();
    INIT.call_once(tracing_wasm::set_as_global_default);
}
