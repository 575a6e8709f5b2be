//! The application shell.

use crate::component::{Component, Mount};
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::model_loading::ModelLoadingNotice;
use crate::components::pokemon_grid::PokemonGrid;
use crate::dom::{Document, Element};
use pokegen_channel::operators;
use pokegen_services::Services;
use std::sync::{Arc, Mutex};

/// The root component: shell layout, refresh control, and the child
/// components for header, notifications, grid, and footer.
pub struct App {
    mount: Mount,
    services: Arc<Services>,
    header: Option<Header>,
    footer: Option<Footer>,
    grid: Option<PokemonGrid>,
    notice: Option<Arc<Mutex<ModelLoadingNotice>>>,
}

impl App {
    #[must_use]
    pub fn new(document: &Document, services: Arc<Services>) -> Self {
        Self {
            mount: Mount::new(document.body().clone()),
            services,
            header: None,
            footer: None,
            grid: None,
            notice: None,
        }
    }

    /// The footer component, mainly for tests.
    #[must_use]
    pub fn footer(&self) -> Option<&Footer> {
        self.footer.as_ref()
    }
}

impl Component for App {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn build(&self) -> Element {
        Element::new("section")
            .with_id("app-container")
            .with_class("hero")
            .with_child(Element::new("div").with_id("app-header"))
            .with_child(Element::new("div").with_id("notifications"))
            .with_child(
                Element::new("div")
                    .with_id("app-body")
                    .with_child(Element::new("h1").with_text("Your Pokemon"))
                    .with_child(
                        Element::new("a")
                            .with_id("pokemon-refresh")
                            .with_child(Element::new("i").with_id("pokemon-refresh-icon")),
                    )
                    .with_child(Element::new("div").with_id("pokemon")),
            )
            .with_child(Element::new("div").with_id("app-footer"))
    }

    fn on_render(&mut self) {
        let Some(element) = self.mount.element.clone() else {
            return;
        };
        let header_slot = element.get_element_by_id("app-header");
        let notifications = element.get_element_by_id("notifications");
        let pokemon_slot = element.get_element_by_id("pokemon");
        let footer_slot = element.get_element_by_id("app-footer");
        let refresh = element.get_element_by_id("pokemon-refresh");
        let refresh_icon = element.get_element_by_id("pokemon-refresh-icon");
        let (
            Some(header_slot),
            Some(notifications),
            Some(pokemon_slot),
            Some(footer_slot),
            Some(refresh),
            Some(refresh_icon),
        ) = (
            header_slot,
            notifications,
            pokemon_slot,
            footer_slot,
            refresh,
            refresh_icon,
        )
        else {
            return;
        };

        let mut header = Header::new(header_slot, Arc::clone(&self.services));
        header.render();
        self.header = Some(header);

        self.notice = Some(ModelLoadingNotice::attach(
            notifications,
            &self.services.caption,
        ));

        let mut grid = PokemonGrid::new(pokemon_slot, Arc::clone(&self.services));
        grid.render();
        self.grid = Some(grid);

        let mut footer = Footer::new(footer_slot, Arc::clone(&self.services));
        footer.render();
        self.footer = Some(footer);

        {
            let pokemon = Arc::clone(&self.services.pokemon);
            let refresh_el = refresh.clone();
            refresh.add_event_listener("click", move || {
                if refresh_el.has_attribute("disabled") {
                    return;
                }
                pokemon.refresh();
            });
        }

        operators::for_each(
            &self.services.pokemon.is_refreshing,
            &self.mount.destroyed,
            move |is_refreshing| {
                if is_refreshing {
                    refresh.set_attribute("disabled", "");
                    refresh_icon.add_class("fa-spin");
                } else {
                    refresh.remove_attribute("disabled");
                    refresh_icon.remove_class("fa-spin");
                }
            },
        );
    }

    fn pre_destroy(&mut self) {
        if let Some(mut footer) = self.footer.take() {
            footer.destroy();
        }
        if let Some(mut grid) = self.grid.take() {
            grid.destroy();
        }
        if let Some(notice) = self.notice.take() {
            notice.lock().expect("notice lock poisoned").destroy();
        }
        if let Some(mut header) = self.header.take() {
            header.destroy();
        }
    }
}
