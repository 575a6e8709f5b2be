//! Error types for the data model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while parsing or validating descriptions and records.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The JSON could not be parsed into the expected shape.
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A field violated a schema constraint.
    #[error("invalid field '{field}': {reason}")]
    Constraint {
        field: &'static str,
        reason: String,
    },
}

impl ModelError {
    pub(crate) fn constraint(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Constraint {
            field,
            reason: reason.into(),
        }
    }
}
