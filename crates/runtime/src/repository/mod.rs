//! Repository layer for catalog persistence
//!
//! Repositories store whole catalogs keyed by name:
//! - [`FileCatalogRepository`] writes one JSON file per catalog
//! - [`InMemoryCatalogRepository`] keeps catalogs in a map for tests
//!
//! Drafts are never persisted; only committed catalogs reach a repository.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileCatalogRepository;
pub use memory::InMemoryCatalogRepository;
pub use traits::{CatalogRepository, LoadedCatalogs};

/// Rejects catalog names that are blank or would escape a storage directory.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == "..";
    if invalid {
        return Err(RepositoryError::InvalidName(name.to_string()));
    }
    Ok(())
}
