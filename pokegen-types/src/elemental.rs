//! The eighteen elemental types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An elemental type a Pokemon can carry.
///
/// Serialized snake_case. Parsing is lenient on ASCII case because the
/// generation model occasionally emits `"FIRE"` or `"Fire"`; anything that
/// is not one of the eighteen names after lowercasing is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementalType {
    Bug,
    Dark,
    Dragon,
    Electric,
    Fairy,
    Fighting,
    Fire,
    Flying,
    Ghost,
    Grass,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
    Steel,
    Water,
}

impl ElementalType {
    /// All eighteen types, in name order.
    pub const ALL: [ElementalType; 18] = [
        Self::Bug,
        Self::Dark,
        Self::Dragon,
        Self::Electric,
        Self::Fairy,
        Self::Fighting,
        Self::Fire,
        Self::Flying,
        Self::Ghost,
        Self::Grass,
        Self::Ground,
        Self::Ice,
        Self::Normal,
        Self::Poison,
        Self::Psychic,
        Self::Rock,
        Self::Steel,
        Self::Water,
    ];

    /// The snake_case name, matching the serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Dark => "dark",
            Self::Dragon => "dragon",
            Self::Electric => "electric",
            Self::Fairy => "fairy",
            Self::Fighting => "fighting",
            Self::Fire => "fire",
            Self::Flying => "flying",
            Self::Ghost => "ghost",
            Self::Grass => "grass",
            Self::Ground => "ground",
            Self::Ice => "ice",
            Self::Normal => "normal",
            Self::Poison => "poison",
            Self::Psychic => "psychic",
            Self::Rock => "rock",
            Self::Steel => "steel",
            Self::Water => "water",
        }
    }
}

impl fmt::Display for ElementalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not an elemental type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown elemental type: {0}")]
pub struct ParseElementalTypeError(pub String);

impl FromStr for ElementalType {
    type Err = ParseElementalTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Self::ALL
            .iter()
            .find(|t| t.as_str() == lowered)
            .copied()
            .ok_or_else(|| ParseElementalTypeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exact() {
        assert_eq!("fire".parse::<ElementalType>().unwrap(), ElementalType::Fire);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("FIRE".parse::<ElementalType>().unwrap(), ElementalType::Fire);
        assert_eq!("Psychic".parse::<ElementalType>().unwrap(), ElementalType::Psychic);
    }

    #[test]
    fn parse_unknown_rejected() {
        assert!("shadow".parse::<ElementalType>().is_err());
        assert!("".parse::<ElementalType>().is_err());
    }

    #[test]
    fn all_has_eighteen_distinct_names() {
        let names: std::collections::BTreeSet<_> =
            ElementalType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names.len(), 18);
    }
}
