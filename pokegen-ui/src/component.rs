//! The component lifecycle contract.

use crate::dom::Element;
use pokegen_channel::Teardown;
use tracing::warn;
use uuid::Uuid;

/// Per-instance mount state every component embeds.
///
/// Composition instead of a base class: a component struct holds a `Mount`
/// plus whatever children and element handles it needs.
pub struct Mount {
    /// Where the component's fragment attaches.
    pub root: Element,
    /// The mounted fragment, `None` before mount and after unmount.
    pub element: Option<Element>,
    /// Instance identity, used to build unique element ids.
    pub guid: Uuid,
    /// Fires on destroy; subscriptions taken during mount are scoped to it.
    pub destroyed: Teardown,
}

impl Mount {
    #[must_use]
    pub fn new(root: Element) -> Self {
        Self {
            root,
            element: None,
            guid: Uuid::new_v4(),
            destroyed: Teardown::new(),
        }
    }
}

/// A visual fragment with a build → mount → hooks → unmount lifecycle.
///
/// Lifecycle invariants:
/// - a component is never mounted twice without an intervening unmount;
///   [`Component::render`] enforces this by detaching a leftover fragment
///   (with a warning) before mounting the new one;
/// - children are owned by their parent and destroyed in the parent's
///   [`Component::pre_destroy`], before the parent detaches its own
///   fragment;
/// - subscriptions taken during mount are scoped to `mount().destroyed`.
pub trait Component {
    fn mount(&self) -> &Mount;
    fn mount_mut(&mut self) -> &mut Mount;

    /// Builds the component's fragment.
    fn build(&self) -> Element;

    /// Hook to perform actions before rendering the component.
    fn pre_render(&mut self) {}

    /// Hook to perform actions after rendering the component.
    fn on_render(&mut self) {}

    /// Hook to perform actions before the component is destroyed. Destroy
    /// owned children here.
    fn pre_destroy(&mut self) {}

    /// Hook to perform actions after the component is destroyed.
    fn on_destroy(&mut self) {}

    /// Whether the fragment is currently mounted.
    fn is_mounted(&self) -> bool {
        self.mount().element.is_some()
    }

    /// Builds the fragment and attaches it under the root.
    fn render(&mut self) {
        self.pre_render();
        if let Some(previous) = self.mount_mut().element.take() {
            warn!("component rendered twice without an unmount; replacing fragment");
            previous.remove();
        }
        let element = self.build();
        self.mount().root.append_child(&element);
        self.mount_mut().element = Some(element);
        self.on_render();
    }

    /// Detaches the fragment without tearing the component down. The
    /// component may render again later.
    fn remove(&mut self) {
        if let Some(element) = self.mount_mut().element.take() {
            element.remove();
        }
    }

    /// Destroys the component: children first, then subscriptions, then
    /// the fragment.
    fn destroy(&mut self) {
        self.pre_destroy();
        self.mount().destroyed.fire();
        if let Some(element) = self.mount_mut().element.take() {
            element.remove();
        }
        self.on_destroy();
    }
}
