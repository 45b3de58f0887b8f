//! Report error types.

use thiserror::Error;

use scraptally_shared::AppError;

/// Errors that can occur while rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// CSV rendering failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The underlying writer failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered output was not valid UTF-8.
    #[error("csv output was not valid UTF-8")]
    Utf8,
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self::Internal(err.to_string())
    }
}
