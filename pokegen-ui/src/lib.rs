//! The application UI.
//!
//! Components own exactly one fragment of a minimal element tree (see
//! [`dom`]) and follow the lifecycle contract in [`component`]: build →
//! mount → hooks → unmount. Parents own their children and destroy them
//! before detaching their own fragment; subscriptions taken during mount
//! are scoped to a per-instance teardown.
//!
//! The element tree is deliberately not a DOM — it is the smallest typed
//! surface the components need: tags, ids, classes, attributes, text,
//! children, and named event handlers.

pub mod component;
pub mod components;
pub mod dom;

pub use component::{Component, Mount};
pub use components::app::App;
pub use dom::{Document, Element};
