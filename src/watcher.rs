use alloc::boxed::Box;
use alloc::string::String;

use crate::{
    ClassTarget, IntersectionEntry, RevealHost, RevealObserver, RevealOptions, RevealOverrides,
};

/// A handle to an active watch registration.
///
/// Every element matched by the selector is registered with the same observer instance. The
/// handle is only needed for manual teardown: dropping it does not stop observation, call
/// [`Watcher::disconnect`] instead.
#[derive(Debug)]
pub struct Watcher<O> {
    observer: O,
    options: RevealOptions,
    selector: String,
    observed: usize,
}

impl<O: RevealObserver> Watcher<O> {
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// The resolved options this registration was created with.
    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Number of elements matched (and registered) when the watcher was created.
    pub fn observed_count(&self) -> usize {
        self.observed
    }

    /// Stops observing every element registered with this watcher.
    pub fn disconnect(&self) {
        rdebug!(selector = %self.selector, "Watcher::disconnect");
        self.observer.disconnect();
    }
}

/// Attaches a visibility watcher to every element currently matching `selector`.
///
/// `overrides` are merged over [`RevealOptions::default`]. Returns `Ok(None)` when the host
/// cannot observe intersections; in that case the selector is not evaluated. Selector and
/// observer-option errors from the host are returned unmodified.
///
/// Only elements present at call time are observed.
pub fn watch<H: RevealHost>(
    host: &H,
    selector: &str,
    overrides: Option<&RevealOverrides>,
) -> Result<Option<Watcher<H::Observer>>, H::Error> {
    let options = overrides.map(RevealOverrides::resolve).unwrap_or_default();
    watch_with(host, selector, options)
}

/// Like [`watch`], with fully resolved options.
pub fn watch_with<H: RevealHost>(
    host: &H,
    selector: &str,
    options: RevealOptions,
) -> Result<Option<Watcher<H::Observer>>, H::Error> {
    let visible_class = options.visible_class.clone();
    let once = options.once;
    let callback = Box::new(
        move |entries: &[IntersectionEntry<H::Element>], observer: &H::Observer| {
            apply_entries(entries, observer, &visible_class, once);
        },
    );

    let Some(observer) = host.create_observer(&options.observer_init(), callback)? else {
        rdebug!(selector, "watch: intersection observation unavailable");
        return Ok(None);
    };

    let elements = host.query_selector_all(selector)?;
    for element in &elements {
        observer.observe(element);
    }
    rdebug!(
        selector,
        matched = elements.len(),
        threshold = options.threshold,
        root_margin = %options.root_margin,
        visible_class = %options.visible_class,
        once = options.once,
        "watch"
    );

    Ok(Some(Watcher {
        observer,
        options,
        selector: selector.into(),
        observed: elements.len(),
    }))
}

/// Applies one batch of intersection entries.
///
/// Every intersecting target gets `visible_class`; with `once`, it is also unobserved so it is
/// never evaluated again. Non-intersecting entries are ignored and the class is never removed.
pub fn apply_entries<O: RevealObserver>(
    entries: &[IntersectionEntry<O::Element>],
    observer: &O,
    visible_class: &str,
    once: bool,
) where
    O::Element: ClassTarget,
{
    for entry in entries.iter().filter(|e| e.is_intersecting) {
        if !entry.target.add_class(visible_class) {
            rwarn!(visible_class, "apply_entries: host rejected class token");
        }
        rtrace!(
            ratio = entry.intersection_ratio,
            once,
            "apply_entries: revealed"
        );
        if once {
            observer.unobserve(&entry.target);
        }
    }
}
