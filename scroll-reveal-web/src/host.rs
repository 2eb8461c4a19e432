use js_sys::{Array, Reflect};
use scroll_reveal::{
    ClassTarget, EntriesCallback, IntersectionEntry, ObserverInit, RevealHost, RevealObserver,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

/// A DOM element as seen by the watcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebElement(pub Element);

impl WebElement {
    pub fn element(&self) -> &Element {
        &self.0
    }
}

impl From<Element> for WebElement {
    fn from(element: Element) -> Self {
        Self(element)
    }
}

impl ClassTarget for WebElement {
    fn add_class(&self, class: &str) -> bool {
        // `DOMTokenList.add` throws on empty or whitespace-containing tokens.
        self.0.class_list().add_1(class).is_ok()
    }
}

/// A platform `IntersectionObserver`.
#[derive(Clone, Debug)]
pub struct WebObserver(pub IntersectionObserver);

impl WebObserver {
    pub fn raw(&self) -> &IntersectionObserver {
        &self.0
    }
}

impl RevealObserver for WebObserver {
    type Element = WebElement;

    fn observe(&self, target: &WebElement) {
        self.0.observe(&target.0);
    }

    fn unobserve(&self, target: &WebElement) {
        self.0.unobserve(&target.0);
    }

    fn disconnect(&self) {
        self.0.disconnect();
    }
}

/// The current browsing context: `window.document` plus the availability of
/// `window.IntersectionObserver`.
#[derive(Clone, Debug)]
pub struct WebHost {
    document: Document,
    intersection_observer: bool,
}

impl WebHost {
    /// Looks up the global `window` and its `document`.
    ///
    /// Returns `None` outside a DOM (workers, Node.js, server-side rendering).
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let ctor = Reflect::get(&window, &JsValue::from_str("IntersectionObserver"));
        let intersection_observer = ctor.is_ok_and(|ctor| ctor.is_function());
        Some(Self {
            document,
            intersection_observer,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn supports_intersection_observer(&self) -> bool {
        self.intersection_observer
    }
}

impl RevealHost for WebHost {
    type Element = WebElement;
    type Observer = WebObserver;
    type Error = JsValue;

    fn create_observer(
        &self,
        init: &ObserverInit,
        mut callback: EntriesCallback<WebElement, WebObserver>,
    ) -> Result<Option<WebObserver>, JsValue> {
        if !self.intersection_observer {
            return Ok(None);
        }

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(init.threshold));
        options.set_root_margin(&init.root_margin);

        let closure = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let batch: Vec<IntersectionEntry<WebElement>> = entries
                    .iter()
                    .map(|value| {
                        let entry: IntersectionObserverEntry = value.unchecked_into();
                        IntersectionEntry::new(
                            WebElement(entry.target()),
                            entry.is_intersecting(),
                            entry.intersection_ratio(),
                        )
                    })
                    .collect();
                callback(&batch, &WebObserver(observer));
            },
        );
        // The observer outlives any Rust handle; let the JS side own the callback.
        let function = closure.into_js_value();
        let observer = IntersectionObserver::new_with_options(function.unchecked_ref(), &options)?;
        Ok(Some(WebObserver(observer)))
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<WebElement>, JsValue> {
        let nodes = self.document.query_selector_all(selector)?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(WebElement)
            .collect())
    }
}
