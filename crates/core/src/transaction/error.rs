//! Bill error types.

use thiserror::Error;

use scraptally_shared::AppError;
use scraptally_shared::types::{PartyId, TransactionId};

use crate::storage::StorageError;

/// Bill operation errors.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// Bill not found or not owned by the caller.
    #[error("transaction not found: {0}")]
    NotFound(TransactionId),

    /// Referenced party absent or not owned by the caller.
    #[error("party not found: {0}")]
    PartyNotFound(PartyId),

    /// A required field is missing or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A numeric field must not be negative.
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    /// Payments must carry a positive amount.
    #[error("valid payment amount required")]
    InvalidPaymentAmount,

    /// The attachment store failed an operation that had to succeed.
    #[error("attachment store error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl TransactionError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_) | TransactionError::PartyNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            TransactionError::MissingField(_)
            | TransactionError::NegativeAmount(_)
            | TransactionError::InvalidPaymentAmount => Self::Validation(err.to_string()),
            TransactionError::Storage(_) => Self::DependencyFailure(err.to_string()),
            TransactionError::Repository(_) => Self::Internal(err.to_string()),
        }
    }
}
