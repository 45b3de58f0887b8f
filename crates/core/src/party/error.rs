//! Party error types.

use thiserror::Error;

use scraptally_shared::AppError;
use scraptally_shared::types::PartyId;

/// Party operation errors.
#[derive(Debug, Error)]
pub enum PartyError {
    /// Party not found or not owned by the caller.
    #[error("party not found: {0}")]
    NotFound(PartyId),

    /// A required field is missing or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The party is referenced by bills and cannot be deleted.
    #[error("cannot delete party with existing transactions")]
    HasTransactions,

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl PartyError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<PartyError> for AppError {
    fn from(err: PartyError) -> Self {
        match err {
            PartyError::NotFound(_) => Self::NotFound(err.to_string()),
            PartyError::MissingField(_) => Self::Validation(err.to_string()),
            PartyError::HasTransactions => Self::Conflict(err.to_string()),
            PartyError::Repository(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_mapping() {
        let app: AppError = PartyError::HasTransactions.into();
        assert_eq!(app.error_code(), "CONFLICT");

        let app: AppError = PartyError::MissingField("name").into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }
}
