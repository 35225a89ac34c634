//! Error types raised by repository implementations.

use sheet_core::{ClassifiedError, ErrorSeverity};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("catalog repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("invalid catalog name: {0:?}")]
    InvalidName(String),
}

impl ClassifiedError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LockPoisoned => ErrorSeverity::Internal,
            Self::InvalidName(_) => ErrorSeverity::Validation,
            Self::Io(_) | Self::Json(_) | Self::CorruptedData(_) => ErrorSeverity::Persistence,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Io(_) => "REPOSITORY_IO",
            Self::Json(_) => "REPOSITORY_JSON",
            Self::CorruptedData(_) => "REPOSITORY_CORRUPTED_DATA",
            Self::InvalidName(_) => "REPOSITORY_INVALID_NAME",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
