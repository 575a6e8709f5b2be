//! One Pokemon record, or a loading placeholder.

use crate::component::{Component, Mount};
use crate::dom::Element;
use pokegen_model::PokemonRecord;
use pokegen_services::Services;
use std::sync::Arc;

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// A card showing one record. Built with `None` to show the skeleton that
/// stands in while a new Pokemon is being generated.
pub struct PokemonCard {
    mount: Mount,
    record: Option<PokemonRecord>,
    services: Arc<Services>,
}

impl PokemonCard {
    #[must_use]
    pub fn new(root: Element, record: Option<PokemonRecord>, services: Arc<Services>) -> Self {
        Self {
            mount: Mount::new(root),
            record,
            services,
        }
    }

    fn favourite_button_id(&self) -> String {
        format!("favourite-{}", self.mount.guid)
    }

    fn delete_button_id(&self) -> String {
        format!("delete-{}", self.mount.guid)
    }

    fn build_skeleton(&self) -> Element {
        Element::new("div")
            .with_class("box")
            .with_class("is-skeleton")
            .with_child(Element::new("p").with_text("Generating..."))
    }

    fn build_card(&self, record: &PokemonRecord) -> Element {
        let types = record.types.iter().fold(
            Element::new("div").with_class("tags"),
            |tags, elemental| {
                tags.with_child(
                    Element::new("span")
                        .with_class("tag")
                        .with_class(format!("type-{elemental}"))
                        .with_text(capitalize(elemental.as_str())),
                )
            },
        );

        let mut favourite = Element::new("button")
            .with_id(self.favourite_button_id())
            .with_class("button");
        if record.favourite {
            favourite = favourite.with_class("is-favourite");
        }

        Element::new("div")
            .with_class("box")
            .with_child(
                Element::new("img")
                    .with_class("image")
                    .with_attribute("src", record.img_url.clone()),
            )
            .with_child(
                Element::new("div")
                    .with_class("title")
                    .with_text(record.name.clone()),
            )
            .with_child(
                Element::new("div")
                    .with_class("subtitle")
                    .with_text(format!("The {} Pokemon", capitalize(&record.category))),
            )
            .with_child(types)
            .with_child(
                Element::new("p")
                    .with_class("content")
                    .with_text(record.flavor_text.clone()),
            )
            .with_child(
                Element::new("span")
                    .with_class("tag")
                    .with_text(capitalize(&record.ability)),
            )
            .with_child(
                Element::new("span")
                    .with_class("tag")
                    .with_text(capitalize(&record.habitat)),
            )
            .with_child(
                Element::new("span")
                    .with_class("tag")
                    .with_text(format!("{} m", record.height)),
            )
            .with_child(
                Element::new("span")
                    .with_class("tag")
                    .with_text(format!("{} kg", record.weight)),
            )
            .with_child(favourite.with_text("Favourite"))
            .with_child(
                Element::new("button")
                    .with_id(self.delete_button_id())
                    .with_class("button")
                    .with_text("Delete"),
            )
    }
}

impl Component for PokemonCard {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn build(&self) -> Element {
        match &self.record {
            Some(record) => self.build_card(record),
            None => self.build_skeleton(),
        }
    }

    fn on_render(&mut self) {
        let Some(record) = &self.record else { return };
        let Some(element) = &self.mount.element else { return };

        if let Some(button) = element.get_element_by_id(&self.favourite_button_id()) {
            let pokemon = Arc::clone(&self.services.pokemon);
            let name = record.name.clone();
            button.add_event_listener("click", move || pokemon.favourite(name.clone()));
        }

        if let Some(button) = element.get_element_by_id(&self.delete_button_id()) {
            let pokemon = Arc::clone(&self.services.pokemon);
            let name = record.name.clone();
            button.add_event_listener("click", move || pokemon.delete(name.clone()));
        }
    }
}
