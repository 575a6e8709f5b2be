//! The application header.

use crate::component::{Component, Mount};
use crate::components::theme_menu::ThemeMenu;
use crate::dom::Element;
use pokegen_services::Services;
use std::sync::Arc;

/// Brand bar with the theme menu.
pub struct Header {
    mount: Mount,
    services: Arc<Services>,
    theme_menu: Option<ThemeMenu>,
}

impl Header {
    #[must_use]
    pub fn new(root: Element, services: Arc<Services>) -> Self {
        Self {
            mount: Mount::new(root),
            services,
            theme_menu: None,
        }
    }
}

impl Component for Header {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn build(&self) -> Element {
        Element::new("nav")
            .with_id("app-navbar")
            .with_class("navbar")
            .with_child(
                Element::new("div")
                    .with_class("navbar-brand")
                    .with_text("Pokemon Generator"),
            )
            .with_child(Element::new("div").with_id("navbar-menu-slot"))
    }

    fn on_render(&mut self) {
        let Some(element) = &self.mount.element else {
            return;
        };
        let Some(slot) = element.get_element_by_id("navbar-menu-slot") else {
            return;
        };
        let mut menu = ThemeMenu::new(slot, Arc::clone(&self.services));
        menu.render();
        self.theme_menu = Some(menu);
    }

    fn pre_destroy(&mut self) {
        if let Some(mut menu) = self.theme_menu.take() {
            menu.destroy();
        }
    }
}
