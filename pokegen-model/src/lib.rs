//! Data model for generated Pokemon.
//!
//! `PokemonDescription` is what the text-generation backend produces;
//! `PokemonRecord` is a description joined with the captured image and the
//! local bookkeeping fields (`favourite`, `timestamp`), keyed by `name` in
//! the record store.
//!
//! The record store is schemaless (JSON rows), so both types carry
//! schema-on-read validation: `from_json` parses *and* checks the
//! constraints the schema promises — field lengths, and one or two
//! elemental types.

mod description;
mod error;
mod record;

pub use description::{FLAVOR_TEXT_MAX_LEN, HABITAT_MAX_LEN, PokemonDescription};
pub use error::{ModelError, ModelResult};
pub use record::PokemonRecord;
