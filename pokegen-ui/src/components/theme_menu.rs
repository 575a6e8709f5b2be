//! The theme selection menu.

use crate::component::{Component, Mount};
use crate::dom::Element;
use pokegen_channel::operators;
use pokegen_services::Services;
use pokegen_types::Theme;
use std::sync::Arc;

/// Light / dark / auto selection, mirroring the current choice into a
/// `data-selected` attribute on the menu.
pub struct ThemeMenu {
    mount: Mount,
    services: Arc<Services>,
}

impl ThemeMenu {
    #[must_use]
    pub fn new(root: Element, services: Arc<Services>) -> Self {
        Self {
            mount: Mount::new(root),
            services,
        }
    }
}

impl Component for ThemeMenu {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn build(&self) -> Element {
        Element::new("div")
            .with_id("theme-menu")
            .with_class("navbar-item")
            .with_child(Element::new("span").with_text("Theme"))
            .with_child(
                Element::new("a")
                    .with_id("select-theme-light")
                    .with_text("Light"),
            )
            .with_child(
                Element::new("a")
                    .with_id("select-theme-dark")
                    .with_text("Dark"),
            )
            .with_child(
                Element::new("a")
                    .with_id("select-theme-auto")
                    .with_text("Auto"),
            )
    }

    fn on_render(&mut self) {
        let Some(menu) = self.mount.element.clone() else {
            return;
        };

        let entries = [
            ("select-theme-light", Some(Theme::Light)),
            ("select-theme-dark", Some(Theme::Dark)),
            ("select-theme-auto", None),
        ];
        for (id, choice) in entries {
            if let Some(entry) = menu.get_element_by_id(id) {
                let theme = Arc::clone(&self.services.theme);
                entry.add_event_listener("click", move || theme.set(choice));
            }
        }

        operators::for_each(
            &self.services.theme.current,
            &self.mount.destroyed,
            move |current| match current {
                Some(theme) => menu.set_attribute("data-selected", theme.as_str()),
                None => menu.set_attribute("data-selected", "auto"),
            },
        );
    }
}
