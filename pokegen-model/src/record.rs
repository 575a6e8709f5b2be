//! The persisted record: a description plus the captured image and local
//! bookkeeping fields.

use crate::description::PokemonDescription;
use crate::error::ModelResult;
use pokegen_types::{ElementalType, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A Pokemon as stored in the local record store, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub ability: String,
    pub category: String,
    pub flavor_text: String,
    pub habitat: String,
    pub height: f64,
    pub name: String,
    pub types: BTreeSet<ElementalType>,
    pub weight: f64,

    /// Data URL of the captured image.
    pub img_url: String,

    /// Whether the user marked this record as a favourite.
    #[serde(default)]
    pub favourite: bool,

    /// When the record was created.
    pub timestamp: Timestamp,
}

impl PokemonRecord {
    /// Builds a record from a generated description and the image it was
    /// generated from. Stamped with the current time, not a favourite.
    #[must_use]
    pub fn from_description(description: PokemonDescription, img_url: impl Into<String>) -> Self {
        Self {
            ability: description.ability,
            category: description.category,
            flavor_text: description.flavor_text,
            habitat: description.habitat,
            height: description.height,
            name: description.name,
            types: description.types,
            weight: description.weight,
            img_url: img_url.into(),
            favourite: false,
            timestamp: Timestamp::now(),
        }
    }

    /// Parses a stored JSON row and validates the description constraints.
    ///
    /// The store is schemaless, so every read passes through here.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let record: Self = serde_json::from_str(json)?;
        record.description().validate()?;
        Ok(record)
    }

    /// The description portion of this record.
    #[must_use]
    pub fn description(&self) -> PokemonDescription {
        PokemonDescription {
            ability: self.ability.clone(),
            category: self.category.clone(),
            flavor_text: self.flavor_text.clone(),
            habitat: self.habitat.clone(),
            height: self.height,
            name: self.name.clone(),
            types: self.types.clone(),
            weight: self.weight,
        }
    }
}
