//! The structured description produced by the text-generation backend.

use crate::error::{ModelError, ModelResult};
use pokegen_types::ElementalType;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Maximum length of the flavor text, in characters.
pub const FLAVOR_TEXT_MAX_LEN: usize = 255;

/// Maximum length of the habitat, in characters.
pub const HABITAT_MAX_LEN: usize = 15;

/// A description of a Pokemon, as generated from an image caption.
///
/// The wire format is schemaless JSON, so use [`PokemonDescription::from_json`]
/// when reading untrusted input — it parses and enforces the constraints in
/// one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonDescription {
    /// The primary ability, which can affect performance in battles.
    pub ability: String,

    /// The category, phrased as a noun.
    pub category: String,

    /// Flavor text adding characterization or lore.
    pub flavor_text: String,

    /// The natural habitat, phrased as a noun.
    pub habitat: String,

    /// Height in meters.
    pub height: f64,

    /// The creative name. Not a real name, not an actual Pokemon name.
    pub name: String,

    /// One or two elemental types.
    #[serde(deserialize_with = "deserialize_types")]
    pub types: BTreeSet<ElementalType>,

    /// Weight in kilograms.
    pub weight: f64,
}

/// The generation model sometimes emits `"FIRE"` or `"Fire"`; accept any
/// ASCII casing of a valid type name.
fn deserialize_types<'de, D>(deserializer: D) -> Result<BTreeSet<ElementalType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    raw.into_iter()
        .map(|s| ElementalType::from_str(&s).map_err(serde::de::Error::custom))
        .collect()
}

impl PokemonDescription {
    /// Parses JSON and validates it against the schema constraints.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let description: Self = serde_json::from_str(json)?;
        description.validate()?;
        Ok(description)
    }

    /// Like [`Self::from_json`], for an already-parsed value.
    pub fn from_value(value: serde_json::Value) -> ModelResult<Self> {
        let description: Self = serde_json::from_value(value)?;
        description.validate()?;
        Ok(description)
    }

    /// Checks the constraints the description schema promises.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::constraint("name", "must not be empty"));
        }
        if self.flavor_text.chars().count() > FLAVOR_TEXT_MAX_LEN {
            return Err(ModelError::constraint(
                "flavor_text",
                format!("longer than {FLAVOR_TEXT_MAX_LEN} characters"),
            ));
        }
        if self.habitat.chars().count() > HABITAT_MAX_LEN {
            return Err(ModelError::constraint(
                "habitat",
                format!("longer than {HABITAT_MAX_LEN} characters"),
            ));
        }
        if self.types.is_empty() || self.types.len() > 2 {
            return Err(ModelError::constraint(
                "types",
                format!("expected 1 or 2 types, got {}", self.types.len()),
            ));
        }
        Ok(())
    }

    /// The JSON schema of the description, embedded in generation prompts so
    /// the model knows the expected shape.
    #[must_use]
    pub fn json_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "ability": {
                    "type": "string",
                    "description": "The primary ability of the Pokemon, which can affect its performance in battles."
                },
                "category": {
                    "type": "string",
                    "description": "The category of the Pokemon, phrased as a noun."
                },
                "flavor_text": {
                    "type": "string",
                    "maxLength": FLAVOR_TEXT_MAX_LEN,
                    "description": "Flavor text to add characterization or lore to the Pokemon in question."
                },
                "habitat": {
                    "type": "string",
                    "maxLength": HABITAT_MAX_LEN,
                    "description": "The natural habitat where the Pokemon can typically be found, phrased as a noun."
                },
                "height": {
                    "type": "number",
                    "description": "The height of the Pokemon in meters."
                },
                "name": {
                    "type": "string",
                    "description": "The creative name for the Pokemon. Avoid using real names or actual Pokemon names."
                },
                "types": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": ElementalType::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>()
                    },
                    "minItems": 1,
                    "maxItems": 2,
                    "description": "The type(s) of the Pokemon."
                },
                "weight": {
                    "type": "number",
                    "description": "The weight of the Pokemon in kilograms."
                }
            },
            "required": [
                "ability", "category", "flavor_text", "habitat",
                "height", "name", "types", "weight"
            ]
        })
    }
}
