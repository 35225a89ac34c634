//! Unified error types surfaced by the runtime API.
//!
//! Wraps repository and session failures so the composition root can bubble
//! them up with consistent context.

use sheet_core::{ClassifiedError, ErrorSeverity};
use thiserror::Error;

pub use crate::repository::RepositoryError;
pub use crate::session::SessionError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ClassifiedError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidConfig { .. } => ErrorSeverity::Validation,
            Self::Repository(error) => error.severity(),
            Self::Session(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "RUNTIME_INVALID_CONFIG",
            Self::Repository(error) => error.error_code(),
            Self::Session(error) => error.error_code(),
        }
    }
}
