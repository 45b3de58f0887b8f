//! Lot error types.

use thiserror::Error;

use scraptally_shared::AppError;
use scraptally_shared::types::{LotId, TransactionId};

/// Lot operation errors.
#[derive(Debug, Error)]
pub enum LotError {
    /// Lot not found or not owned by the caller.
    #[error("lot not found: {0}")]
    NotFound(LotId),

    /// A required field is missing or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// An allocation carries a zero or absent weight, rate or amount.
    #[error("allocation {0} must be non-zero")]
    InvalidEntryValue(&'static str),

    /// The bill is already allocated on this side of the lot.
    #[error("transaction {0} is already linked to this lot")]
    DuplicateEntry(TransactionId),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl LotError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<LotError> for AppError {
    fn from(err: LotError) -> Self {
        match err {
            LotError::NotFound(_) => Self::NotFound(err.to_string()),
            LotError::MissingField(_) | LotError::InvalidEntryValue(_) => {
                Self::Validation(err.to_string())
            }
            LotError::DuplicateEntry(_) => Self::Conflict(err.to_string()),
            LotError::Repository(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_mapping() {
        let app: AppError = LotError::NotFound(LotId::new()).into();
        assert_eq!(app.error_code(), "NOT_FOUND");

        let app: AppError = LotError::MissingField("lotNumber").into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");

        let app: AppError = LotError::DuplicateEntry(TransactionId::new()).into();
        assert_eq!(app.error_code(), "CONFLICT");
        assert_eq!(app.status_code(), 409);
    }
}
