//! Error types for the service layer.

use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by service operations that return to a caller (the
/// pipelines themselves log and swallow).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP transport or status error.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response did not match the description schema.
    #[error(transparent)]
    Model(#[from] pokegen_model::ModelError),

    /// The record or preference store failed.
    #[error(transparent)]
    Storage(#[from] pokegen_storage::StorageError),

    /// A blocking task was cancelled or panicked.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
