use alloc::string::String;
use alloc::vec::Vec;

use crate::{RevealHost, RevealOverrides, Watcher, watch};

/// One `(selector, overrides)` pair for [`watch_many`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WatchEntry {
    pub selector: String,
    #[cfg_attr(feature = "serde", serde(default, alias = "options", alias = "config"))]
    pub overrides: Option<RevealOverrides>,
}

impl WatchEntry {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            overrides: None,
        }
    }

    pub fn with_overrides(mut self, overrides: RevealOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }
}

/// Applies [`watch`] to each entry in order and keeps the watchers that were created.
///
/// Entries whose environment check fails are skipped without affecting the others; surviving
/// watchers keep input order. A host error stops the batch and is returned as-is, leaving
/// earlier registrations in place.
pub fn watch_many<'a, H: RevealHost>(
    host: &H,
    entries: impl IntoIterator<Item = &'a WatchEntry>,
) -> Result<Vec<Watcher<H::Observer>>, H::Error> {
    let mut watchers = Vec::new();
    for entry in entries {
        if let Some(w) = watch(host, &entry.selector, entry.overrides.as_ref())? {
            watchers.push(w);
        }
    }
    rtrace!(created = watchers.len(), "watch_many");
    Ok(watchers)
}
