//! The grid of generated Pokemon.

use crate::component::{Component, Mount};
use crate::components::pokemon_card::PokemonCard;
use crate::dom::Element;
use pokegen_channel::operators;
use pokegen_model::PokemonRecord;
use pokegen_services::Services;
use std::sync::{Arc, Mutex};

/// The list of Pokemon, re-rendered whenever the list or the generation
/// state changes. Shows a placeholder when there is nothing to show and a
/// skeleton card at the top while a new Pokemon is generating.
pub struct PokemonGrid {
    mount: Mount,
    services: Arc<Services>,
    cards: Arc<Mutex<Vec<PokemonCard>>>,
}

impl PokemonGrid {
    #[must_use]
    pub fn new(root: Element, services: Arc<Services>) -> Self {
        Self {
            mount: Mount::new(root),
            services,
            cards: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

fn render_grid(
    grid: &Element,
    cards: &Mutex<Vec<PokemonCard>>,
    services: &Arc<Services>,
    pokemon: Vec<PokemonRecord>,
    is_generating: bool,
) {
    // Old cards die before their cells leave the tree.
    for mut card in cards.lock().expect("grid cards lock poisoned").drain(..) {
        card.destroy();
    }
    grid.clear_children();

    if pokemon.is_empty() && !is_generating {
        grid.append_child(
            &Element::new("p")
                .with_id("pokemon-empty-placeholder")
                .with_text("Nothing to show here yet!"),
        );
        return;
    }

    let mut new_cards = Vec::new();
    if is_generating {
        let cell = Element::new("div").with_class("cell");
        let mut card = PokemonCard::new(cell.clone(), None, Arc::clone(services));
        grid.append_child(&cell);
        card.render();
        new_cards.push(card);
    }
    for record in pokemon {
        let cell = Element::new("div").with_class("cell");
        let mut card = PokemonCard::new(cell.clone(), Some(record), Arc::clone(services));
        grid.append_child(&cell);
        card.render();
        new_cards.push(card);
    }
    *cards.lock().expect("grid cards lock poisoned") = new_cards;
}

impl Component for PokemonGrid {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn build(&self) -> Element {
        Element::new("div").with_id("pokemon-grid").with_class("grid")
    }

    fn on_render(&mut self) {
        let Some(grid) = self.mount.element.clone() else {
            return;
        };

        let listings = operators::combine_latest(
            &self.services.pokemon.pokemon,
            &self.services.pokemon.is_generating,
            &self.mount.destroyed,
        );
        let cards = Arc::clone(&self.cards);
        let services = Arc::clone(&self.services);
        operators::for_each(&listings, &self.mount.destroyed, move |(pokemon, is_generating)| {
            render_grid(&grid, &cards, &services, pokemon, is_generating);
        });
    }

    fn pre_destroy(&mut self) {
        for mut card in self
            .cards
            .lock()
            .expect("grid cards lock poisoned")
            .drain(..)
        {
            card.destroy();
        }
    }
}
