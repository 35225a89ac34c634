//! Errors returned by edit session commands.

use sheet_core::{ClassifiedError, ErrorSeverity, TableError};
use thiserror::Error;

use crate::repository::RepositoryError;

/// A rejected session command. The session state is unchanged when one is returned.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("name must not be blank")]
    BlankName,

    #[error("tag must not be blank")]
    BlankTag,

    #[error("a datasheet named {0:?} already exists in this catalog")]
    DuplicateSheet(String),

    #[error("a catalog named {0:?} already exists")]
    DuplicateCatalog(String),

    #[error("the {0} catalog cannot be renamed or removed")]
    PinnedCatalog(&'static str),

    #[error("catalog {index} is out of range (catalogs: {len})")]
    CatalogOutOfRange { index: usize, len: usize },

    #[error("datasheet {index} is out of range (datasheets: {len})")]
    SheetOutOfRange { index: usize, len: usize },

    #[error("no datasheet is selected")]
    NoSheetSelected,

    #[error("selected datasheet has no draft")]
    NoDraft,

    #[error("selected datasheet has no unsaved changes")]
    NothingToSave,

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ClassifiedError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        use SessionError::*;
        match self {
            BlankName | BlankTag | DuplicateSheet(_) | DuplicateCatalog(_) | PinnedCatalog(_)
            | NothingToSave => ErrorSeverity::Validation,
            CatalogOutOfRange { .. } | SheetOutOfRange { .. } | NoSheetSelected | NoDraft => {
                ErrorSeverity::Internal
            }
            Table(error) => error.severity(),
            Repository(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use SessionError::*;
        match self {
            BlankName => "SESSION_BLANK_NAME",
            BlankTag => "SESSION_BLANK_TAG",
            DuplicateSheet(_) => "SESSION_DUPLICATE_SHEET",
            DuplicateCatalog(_) => "SESSION_DUPLICATE_CATALOG",
            PinnedCatalog(_) => "SESSION_PINNED_CATALOG",
            CatalogOutOfRange { .. } => "SESSION_CATALOG_OUT_OF_RANGE",
            SheetOutOfRange { .. } => "SESSION_SHEET_OUT_OF_RANGE",
            NoSheetSelected => "SESSION_NO_SHEET_SELECTED",
            NoDraft => "SESSION_NO_DRAFT",
            NothingToSave => "SESSION_NOTHING_TO_SAVE",
            Table(error) => error.error_code(),
            Repository(error) => error.error_code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
