use alloc::string::{String, ToString};

pub const DEFAULT_THRESHOLD: f64 = 0.2;
pub const DEFAULT_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const DEFAULT_VISIBLE_CLASS: &str = "visible";

/// Resolved configuration for a single watch registration.
///
/// With `feature = "serde"`, this type deserializes from camelCase keys (`threshold`,
/// `rootMargin`, `visibleClass`, `once`). Missing keys take their defaults and unknown keys are
/// ignored.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RevealOptions {
    /// Fraction of the target that must be visible before it counts as intersecting.
    pub threshold: f64,
    /// CSS-margin-like adjustment of the root (e.g. `"0px 0px -50px 0px"`).
    pub root_margin: String,
    /// Class added to an element once it intersects.
    pub visible_class: String,
    /// Stop observing an element right after its first intersecting report.
    pub once: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: DEFAULT_ROOT_MARGIN.to_string(),
            visible_class: DEFAULT_VISIBLE_CLASS.to_string(),
            once: true,
        }
    }
}

impl RevealOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_root_margin(mut self, root_margin: impl Into<String>) -> Self {
        self.root_margin = root_margin.into();
        self
    }

    pub fn with_visible_class(mut self, visible_class: impl Into<String>) -> Self {
        self.visible_class = visible_class.into();
        self
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Options forwarded to the host's intersection primitive.
    pub fn observer_init(&self) -> ObserverInit {
        ObserverInit {
            threshold: self.threshold,
            root_margin: self.root_margin.clone(),
        }
    }
}

/// A partial configuration. Fields left as `None` fall back to [`RevealOptions::default`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RevealOverrides {
    pub threshold: Option<f64>,
    pub root_margin: Option<String>,
    pub visible_class: Option<String>,
    pub once: Option<bool>,
}

impl RevealOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn root_margin(mut self, root_margin: impl Into<String>) -> Self {
        self.root_margin = Some(root_margin.into());
        self
    }

    pub fn visible_class(mut self, visible_class: impl Into<String>) -> Self {
        self.visible_class = Some(visible_class.into());
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = Some(once);
        self
    }

    /// Merges the supplied fields over the defaults.
    pub fn resolve(&self) -> RevealOptions {
        self.apply_to(RevealOptions::default())
    }

    /// Merges the supplied fields over `base`.
    pub fn apply_to(&self, mut base: RevealOptions) -> RevealOptions {
        if let Some(threshold) = self.threshold {
            base.threshold = threshold;
        }
        if let Some(root_margin) = &self.root_margin {
            base.root_margin.clone_from(root_margin);
        }
        if let Some(visible_class) = &self.visible_class {
            base.visible_class.clone_from(visible_class);
        }
        if let Some(once) = self.once {
            base.once = once;
        }
        base
    }
}

impl From<RevealOptions> for RevealOverrides {
    fn from(options: RevealOptions) -> Self {
        Self {
            threshold: Some(options.threshold),
            root_margin: Some(options.root_margin),
            visible_class: Some(options.visible_class),
            once: Some(options.once),
        }
    }
}

/// The subset of options handed to the intersection primitive, forwarded unmodified.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ObserverInit {
    pub threshold: f64,
    pub root_margin: String,
}
