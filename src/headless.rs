use alloc::collections::BTreeSet;
use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::margin::{RootMargin, RootMarginError};
use crate::{
    ClassTarget, EntriesCallback, IntersectionEntry, ObserverInit, Rect, RevealHost,
    RevealObserver,
};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum HeadlessError {
    #[error("'{0}' is not a valid selector")]
    InvalidSelector(String),
    #[error(transparent)]
    InvalidRootMargin(#[from] RootMarginError),
    #[error("threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f64),
}

struct ElementData {
    tag: String,
    id: RefCell<Option<String>>,
    classes: RefCell<BTreeSet<String>>,
    rect: Cell<Rect>,
}

/// An element in a [`HeadlessHost`] document.
///
/// Cloning yields another reference to the same element; equality is identity.
#[derive(Clone)]
pub struct HeadlessElement(Rc<ElementData>);

impl HeadlessElement {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(ElementData {
            tag: tag.to_ascii_lowercase(),
            id: RefCell::new(None),
            classes: RefCell::new(BTreeSet::new()),
            rect: Cell::new(Rect::default()),
        }))
    }

    pub fn with_id(self, id: &str) -> Self {
        *self.0.id.borrow_mut() = Some(id.into());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_rect(self, rect: Rect) -> Self {
        self.set_rect(rect);
        self
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn id(&self) -> Option<String> {
        self.0.id.borrow().clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().contains(class)
    }

    /// Class list in sorted order.
    pub fn classes(&self) -> Vec<String> {
        self.0.classes.borrow().iter().cloned().collect()
    }

    pub fn rect(&self) -> Rect {
        self.0.rect.get()
    }

    pub fn set_rect(&self, rect: Rect) {
        self.0.rect.set(rect);
    }
}

impl ClassTarget for HeadlessElement {
    fn add_class(&self, class: &str) -> bool {
        // Same token rules as DOMTokenList::add.
        if class.is_empty() || class.chars().any(char::is_whitespace) {
            return false;
        }
        self.0.classes.borrow_mut().insert(class.to_string());
        true
    }
}

impl PartialEq for HeadlessElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for HeadlessElement {}

impl fmt::Debug for HeadlessElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessElement")
            .field("tag", &self.0.tag)
            .field("id", &self.0.id.borrow())
            .field("classes", &self.0.classes.borrow())
            .field("rect", &self.0.rect.get())
            .finish()
    }
}

struct Target {
    element: HeadlessElement,
    // Last reported `is_intersecting`; `None` until first evaluated.
    last: Option<bool>,
}

struct ObserverData {
    init: ObserverInit,
    margin: RootMargin,
    targets: RefCell<Vec<Target>>,
    callback: RefCell<EntriesCallback<HeadlessElement, HeadlessObserver>>,
    disconnected: Cell<bool>,
    doc: Weak<RefCell<Document>>,
}

/// An observer created by a [`HeadlessHost`].
#[derive(Clone)]
pub struct HeadlessObserver(Rc<ObserverData>);

impl HeadlessObserver {
    /// The options this observer was created with, exactly as supplied.
    pub fn init(&self) -> &ObserverInit {
        &self.0.init
    }

    pub fn is_observing(&self, element: &HeadlessElement) -> bool {
        self.0
            .targets
            .borrow()
            .iter()
            .any(|t| t.element == *element)
    }

    pub fn observed(&self) -> Vec<HeadlessElement> {
        self.0
            .targets
            .borrow()
            .iter()
            .map(|t| t.element.clone())
            .collect()
    }

    pub fn is_disconnected(&self) -> bool {
        self.0.disconnected.get()
    }

    fn deliver(&self, entries: &[IntersectionEntry<HeadlessElement>]) {
        if entries.is_empty() || self.is_disconnected() {
            return;
        }
        let mut callback = self.0.callback.borrow_mut();
        (&mut *callback)(entries, self);
    }

    // Observers without targets are dropped from the tick list; observing again re-registers.
    fn register(&self) {
        let Some(cell) = self.0.doc.upgrade() else {
            return;
        };
        let Ok(mut doc) = cell.try_borrow_mut() else {
            return;
        };
        if !doc.observers.contains(self) {
            doc.observers.push(self.clone());
        }
    }

    fn is_exhausted(&self) -> bool {
        self.is_disconnected() || self.0.targets.borrow().is_empty()
    }

    fn evaluate(&self, viewport: Rect) -> Vec<IntersectionEntry<HeadlessElement>> {
        let root = self.0.margin.expand(viewport);
        let threshold = self.0.init.threshold;
        let mut entries = Vec::new();
        for target in self.0.targets.borrow_mut().iter_mut() {
            let (is_intersecting, ratio) = measure(root, target.element.rect(), threshold);
            if target.last != Some(is_intersecting) {
                target.last = Some(is_intersecting);
                entries.push(IntersectionEntry::new(
                    target.element.clone(),
                    is_intersecting,
                    ratio,
                ));
            }
        }
        entries
    }
}

impl PartialEq for HeadlessObserver {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for HeadlessObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessObserver")
            .field("init", &self.0.init)
            .field("targets", &self.0.targets.borrow().len())
            .field("disconnected", &self.0.disconnected.get())
            .finish_non_exhaustive()
    }
}

impl RevealObserver for HeadlessObserver {
    type Element = HeadlessElement;

    fn observe(&self, target: &HeadlessElement) {
        if self.0.disconnected.get() || self.is_observing(target) {
            return;
        }
        self.0.targets.borrow_mut().push(Target {
            element: target.clone(),
            last: None,
        });
        self.register();
    }

    fn unobserve(&self, target: &HeadlessElement) {
        self.0
            .targets
            .borrow_mut()
            .retain(|t| t.element != *target);
    }

    fn disconnect(&self) {
        self.0.disconnected.set(true);
        self.0.targets.borrow_mut().clear();
    }
}

/// Computes `(is_intersecting, intersection_ratio)` for a target against the margin-adjusted root.
fn measure(root: Rect, target: Rect, threshold: f64) -> (bool, f64) {
    let Some(overlap) = target.intersection(&root) else {
        return (false, 0.0);
    };
    let area = target.area();
    let ratio = if area > 0.0 {
        (overlap.area() / area).min(1.0)
    } else {
        1.0
    };
    (ratio >= threshold, ratio)
}

struct Document {
    elements: Vec<HeadlessElement>,
    viewport: Rect,
    supported: bool,
    observers: Vec<HeadlessObserver>,
}

/// A DOM-emulating host for non-browser targets and tests.
///
/// The document is a flat list of elements with explicit rectangles. Observation is driven by
/// the adapter: move elements or the viewport, then call [`HeadlessHost::tick`] to deliver
/// pending intersection entries.
#[derive(Clone)]
pub struct HeadlessHost {
    doc: Rc<RefCell<Document>>,
}

impl HeadlessHost {
    pub fn new(viewport: Rect) -> Self {
        Self {
            doc: Rc::new(RefCell::new(Document {
                elements: Vec::new(),
                viewport,
                supported: true,
                observers: Vec::new(),
            })),
        }
    }

    /// A host without an intersection primitive; every watch degrades to `None`.
    pub fn unsupported() -> Self {
        let host = Self::new(Rect::default());
        host.set_supported(false);
        host
    }

    pub fn set_supported(&self, supported: bool) {
        self.doc.borrow_mut().supported = supported;
    }

    pub fn is_supported(&self) -> bool {
        self.doc.borrow().supported
    }

    /// Appends `element` to the document and returns it.
    pub fn append(&self, element: HeadlessElement) -> HeadlessElement {
        self.doc.borrow_mut().elements.push(element.clone());
        element
    }

    pub fn viewport(&self) -> Rect {
        self.doc.borrow().viewport
    }

    pub fn set_viewport(&self, viewport: Rect) {
        self.doc.borrow_mut().viewport = viewport;
    }

    /// Moves the viewport origin to `(x, y)`, keeping its size.
    pub fn scroll_to(&self, x: f64, y: f64) {
        let mut doc = self.doc.borrow_mut();
        doc.viewport.x = x;
        doc.viewport.y = y;
    }

    /// Evaluates every live observer and delivers changed entries.
    ///
    /// A target is reported on its first evaluation and afterwards only when its intersecting
    /// state changes. Returns the number of entries delivered.
    pub fn tick(&self) -> usize {
        self.prune();
        let (viewport, observers) = {
            let doc = self.doc.borrow();
            (doc.viewport, doc.observers.clone())
        };

        let mut delivered = 0usize;
        for observer in &observers {
            let entries = observer.evaluate(viewport);
            delivered += entries.len();
            observer.deliver(&entries);
        }
        self.prune();
        rtrace!(delivered, "HeadlessHost::tick");
        delivered
    }

    fn prune(&self) {
        self.doc
            .borrow_mut()
            .observers
            .retain(|o| !o.is_exhausted());
    }

    /// Delivers synthetic `entries` to `observer` without any geometry evaluation.
    ///
    /// Like the platform, a disconnected observer receives nothing and entries for targets it
    /// no longer observes are dropped.
    pub fn report(
        &self,
        observer: &HeadlessObserver,
        entries: &[IntersectionEntry<HeadlessElement>],
    ) {
        let entries: Vec<_> = entries
            .iter()
            .filter(|e| observer.is_observing(&e.target))
            .cloned()
            .collect();
        observer.deliver(&entries);
    }

    /// Observers that still have targets to evaluate.
    pub fn observers(&self) -> Vec<HeadlessObserver> {
        self.doc.borrow().observers.clone()
    }
}

impl fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.doc.borrow();
        f.debug_struct("HeadlessHost")
            .field("elements", &doc.elements.len())
            .field("viewport", &doc.viewport)
            .field("supported", &doc.supported)
            .field("observers", &doc.observers.len())
            .finish()
    }
}

impl RevealHost for HeadlessHost {
    type Element = HeadlessElement;
    type Observer = HeadlessObserver;
    type Error = HeadlessError;

    fn create_observer(
        &self,
        init: &ObserverInit,
        callback: EntriesCallback<HeadlessElement, HeadlessObserver>,
    ) -> Result<Option<HeadlessObserver>, HeadlessError> {
        if !self.is_supported() {
            return Ok(None);
        }
        if !(0.0..=1.0).contains(&init.threshold) {
            return Err(HeadlessError::ThresholdOutOfRange(init.threshold));
        }
        let margin: RootMargin = init.root_margin.parse()?;

        let observer = HeadlessObserver(Rc::new(ObserverData {
            init: init.clone(),
            margin,
            targets: RefCell::new(Vec::new()),
            callback: RefCell::new(callback),
            disconnected: Cell::new(false),
            doc: Rc::downgrade(&self.doc),
        }));
        self.doc.borrow_mut().observers.push(observer.clone());
        Ok(Some(observer))
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<HeadlessElement>, HeadlessError> {
        let list = parse_selector_list(selector)?;
        Ok(self
            .doc
            .borrow()
            .elements
            .iter()
            .filter(|el| list.iter().any(|c| c.matches(el)))
            .cloned()
            .collect())
    }
}

/// One compound selector: `tag#id.class.class`, any part optional but not all.
#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, el: &HeadlessElement) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && *tag != el.tag() {
                return false;
            }
        }
        let id = el.id();
        if self.ids.iter().any(|want| id.as_deref() != Some(want.as_str())) {
            return false;
        }
        self.classes.iter().all(|c| el.has_class(c))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
    s.split_at(end)
}

fn parse_compound(src: &str, full: &str) -> Result<Compound, HeadlessError> {
    let invalid = || HeadlessError::InvalidSelector(full.into());
    let mut compound = Compound::default();
    let mut rest = src;

    if let Some(r) = rest.strip_prefix('*') {
        compound.tag = Some("*".into());
        rest = r;
    } else {
        let (ident, r) = take_ident(rest);
        if !ident.is_empty() {
            if !ident.starts_with(|c: char| c.is_ascii_alphabetic()) {
                return Err(invalid());
            }
            compound.tag = Some(ident.to_ascii_lowercase());
            rest = r;
        }
    }

    while let Some(c) = rest.chars().next() {
        if c != '.' && c != '#' {
            return Err(invalid());
        }
        let (ident, r) = take_ident(&rest[1..]);
        if ident.is_empty() {
            return Err(invalid());
        }
        if c == '.' {
            compound.classes.push(ident.into());
        } else {
            compound.ids.push(ident.into());
        }
        rest = r;
    }

    if compound == Compound::default() {
        return Err(invalid());
    }
    Ok(compound)
}

fn parse_selector_list(selector: &str) -> Result<Vec<Compound>, HeadlessError> {
    selector
        .split(',')
        .map(|part| parse_compound(part.trim(), selector))
        .collect()
}
