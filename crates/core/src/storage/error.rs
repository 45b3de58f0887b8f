//! Storage error types.

use thiserror::Error;

use scraptally_shared::AppError;

/// Attachment store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store is misconfigured.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// Unknown storage backend name.
    #[error("unknown storage backend: {0}")]
    UnknownBackend(String),

    /// The backend rejected or failed an operation.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a backend error.
    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::DependencyFailure(err.to_string())
    }
}
