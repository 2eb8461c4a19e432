use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::{IntersectionEntry, ObserverInit};

/// An element whose class list can be mutated.
pub trait ClassTarget {
    /// Adds `class` to the element's class list. Adding a present class is a no-op.
    ///
    /// Returns `false` when the host rejects the class token.
    fn add_class(&self, class: &str) -> bool;
}

/// A viewport-intersection observer instance.
pub trait RevealObserver {
    type Element;

    fn observe(&self, target: &Self::Element);
    fn unobserve(&self, target: &Self::Element);
    fn disconnect(&self);
}

/// Callback invoked by the host with each batch of entries and the observer that produced them.
pub type EntriesCallback<E, O> = Box<dyn FnMut(&[IntersectionEntry<E>], &O)>;

/// The document and platform capabilities a watcher needs.
///
/// Browser adapters implement this over `window.document` and `IntersectionObserver`;
/// [`crate::HeadlessHost`] implements it for DOM-emulating targets.
pub trait RevealHost {
    type Element: ClassTarget + Clone + 'static;
    type Observer: RevealObserver<Element = Self::Element> + 'static;
    type Error;

    /// Creates an observer that reports to `callback`.
    ///
    /// Returns `Ok(None)` when the environment has no document or no intersection primitive.
    /// Errors raised by the primitive for the given options are returned unmodified.
    fn create_observer(
        &self,
        init: &ObserverInit,
        callback: EntriesCallback<Self::Element, Self::Observer>,
    ) -> Result<Option<Self::Observer>, Self::Error>;

    /// Returns every element currently matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Element>, Self::Error>;
}
