//! A minimal element tree.
//!
//! Elements are reference-counted handles; cloning a handle aliases the
//! same node. The tree supports exactly what the components use: ids,
//! classes, attributes, text, children, and named event handlers that
//! tests can dispatch.

use pokegen_services::ThemeTarget;
use pokegen_types::Theme;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, Weak};

type Handler = Arc<dyn Fn() + Send + Sync>;

struct ElementData {
    tag: String,
    id: Option<String>,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    text: String,
    children: Vec<Element>,
    parent: Option<Weak<Mutex<ElementData>>>,
    handlers: HashMap<String, Vec<Handler>>,
}

/// A node handle in the element tree.
#[derive(Clone)]
pub struct Element {
    inner: Arc<Mutex<ElementData>>,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ElementData {
                tag: tag.into(),
                id: None,
                attributes: BTreeMap::new(),
                classes: BTreeSet::new(),
                text: String::new(),
                children: Vec::new(),
                parent: None,
                handlers: HashMap::new(),
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ElementData> {
        self.inner.lock().expect("element lock poisoned")
    }

    /// Whether two handles alias the same node.
    #[must_use]
    pub fn is_same(&self, other: &Element) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ── Builder-style construction ────────────────────────────────

    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.lock().id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.lock().classes.insert(class.into());
        self
    }

    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.lock().text = text.into();
        self
    }

    #[must_use]
    pub fn with_attribute(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.lock().attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_child(self, child: Element) -> Self {
        self.append_child(&child);
        self
    }

    // ── Tree manipulation ─────────────────────────────────────────

    /// Appends `child` under this node, detaching it from any previous
    /// parent first.
    pub fn append_child(&self, child: &Element) {
        child.remove();
        child.lock().parent = Some(Arc::downgrade(&self.inner));
        self.lock().children.push(child.clone());
    }

    /// Detaches this node from its parent. No-op for a root.
    pub fn remove(&self) {
        let parent = self.lock().parent.take();
        if let Some(parent) = parent.and_then(|weak| weak.upgrade()) {
            parent
                .lock()
                .expect("element lock poisoned")
                .children
                .retain(|c| !Arc::ptr_eq(&c.inner, &self.inner));
        }
    }

    /// Detaches every child.
    pub fn clear_children(&self) {
        let children = self.children();
        for child in children {
            child.remove();
        }
    }

    #[must_use]
    pub fn children(&self) -> Vec<Element> {
        self.lock().children.clone()
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.lock().children.len()
    }

    /// Depth-first search by id, including this node.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        if self.lock().id.as_deref() == Some(id) {
            return Some(self.clone());
        }
        for child in self.children() {
            if let Some(found) = child.get_element_by_id(id) {
                return Some(found);
            }
        }
        None
    }

    // ── Node state ────────────────────────────────────────────────

    #[must_use]
    pub fn tag(&self) -> String {
        self.lock().tag.clone()
    }

    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.lock().id.clone()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.lock().text = text.into();
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.lock().attributes.get(key).cloned()
    }

    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.lock().attributes.contains_key(key)
    }

    pub fn set_attribute(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().attributes.insert(key.into(), value.into());
    }

    pub fn remove_attribute(&self, key: &str) {
        self.lock().attributes.remove(key);
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.lock().classes.contains(class)
    }

    pub fn add_class(&self, class: impl Into<String>) {
        self.lock().classes.insert(class.into());
    }

    pub fn remove_class(&self, class: &str) {
        self.lock().classes.remove(class);
    }

    // ── Events ────────────────────────────────────────────────────

    /// Registers a handler for a named event.
    pub fn add_event_listener(&self, event: impl Into<String>, handler: impl Fn() + Send + Sync + 'static) {
        self.lock()
            .handlers
            .entry(event.into())
            .or_default()
            .push(Arc::new(handler));
    }

    /// Fires every handler registered for the event. Handlers run outside
    /// the node lock, so they may freely mutate the tree.
    pub fn dispatch(&self, event: &str) {
        let handlers: Vec<Handler> = self
            .lock()
            .handlers
            .get(event)
            .cloned()
            .unwrap_or_default();
        for handler in handlers {
            handler();
        }
    }
}

/// The document: an `html` root with a `body`, carrying the theme
/// attribute the theme service mirrors onto.
pub struct Document {
    html: Element,
    body: Element,
}

/// The document-level attribute the theme is mirrored onto.
pub const THEME_ATTRIBUTE: &str = "data-theme";

impl Document {
    #[must_use]
    pub fn new() -> Arc<Self> {
        let html = Element::new("html");
        let body = Element::new("body");
        html.append_child(&body);
        Arc::new(Self { html, body })
    }

    #[must_use]
    pub fn html(&self) -> &Element {
        &self.html
    }

    #[must_use]
    pub fn body(&self) -> &Element {
        &self.body
    }

    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.html.get_element_by_id(id)
    }
}

impl ThemeTarget for Document {
    fn set_theme_attribute(&self, theme: Theme) {
        self.html.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    }

    fn clear_theme_attribute(&self) {
        self.html.remove_attribute(THEME_ATTRIBUTE);
    }
}
