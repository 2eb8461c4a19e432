//! A headless reveal-on-scroll watcher.
//!
//! For the browser binding (`window.document` + `IntersectionObserver`), see the
//! `scroll-reveal-web` crate.
//!
//! The crate attaches a visibility watcher to every element matched by a CSS selector and adds
//! a marker class (`"visible"` by default) once an element crosses a visibility threshold.
//!
//! It is platform-agnostic. A host layer is expected to provide:
//! - element lookup by selector
//! - an intersection observer primitive (observe / unobserve / disconnect)
//! - class-list mutation on elements
//!
//! [`HeadlessHost`] is a DOM-emulating host that evaluates intersections from explicit
//! element rectangles, useful for non-browser targets and tests.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod batch;
mod headless;
mod host;
mod margin;
mod options;
mod types;
mod watcher;


pub use batch::{WatchEntry, watch_many};
pub use headless::{HeadlessElement, HeadlessError, HeadlessHost, HeadlessObserver};
pub use host::{ClassTarget, EntriesCallback, RevealHost, RevealObserver};
pub use margin::{MarginLength, RootMargin, RootMarginError};
pub use options::{
    DEFAULT_ROOT_MARGIN, DEFAULT_THRESHOLD, DEFAULT_VISIBLE_CLASS, ObserverInit, RevealOptions,
    RevealOverrides,
};
pub use types::{IntersectionEntry, Rect};
pub use watcher::{Watcher, apply_entries, watch, watch_with};
