//! Repository contract for saving and loading catalogs.

use std::collections::HashSet;

use sheet_core::{Catalog, DEFAULT_CATALOG};

use super::{RepositoryError, Result};

/// Outcome of [`CatalogRepository::load_all`].
#[derive(Debug, Default)]
pub struct LoadedCatalogs {
    /// Readable catalogs, Default first.
    pub catalogs: Vec<Catalog>,
    /// Catalogs that could not be read, by name.
    pub failures: Vec<(String, RepositoryError)>,
}

/// Repository for catalog persistence
///
/// One record per catalog, keyed by catalog name. Writes replace the whole
/// record.
pub trait CatalogRepository: Send + Sync {
    /// Names of all stored catalogs, sorted.
    fn list_names(&self) -> Result<Vec<String>>;

    /// Load a catalog by name
    fn load(&self, name: &str) -> Result<Option<Catalog>>;

    /// Save a catalog under its own name, replacing any previous record
    fn save(&self, catalog: &Catalog) -> Result<()>;

    /// Delete a catalog. Deleting a missing catalog is not an error.
    fn delete(&self, name: &str) -> Result<()>;

    /// Check if a catalog exists
    fn exists(&self, name: &str) -> bool;

    /// Move an unreadable record out of the catalog namespace, keeping its
    /// bytes, so `name` can be written again without destroying them.
    ///
    /// Returns where the record went, or `None` when nothing was stored.
    fn set_aside(&self, name: &str) -> Result<Option<String>>;

    /// Load every stored catalog.
    ///
    /// A catalog that fails to load is reported in
    /// [`LoadedCatalogs::failures`] and skipped. The Default catalog is moved
    /// to the front; when it is not stored it is created empty and saved.
    /// An unreadable Default record is set aside first, and the load fails
    /// if that is not possible. Sheets whose id already appeared in an
    /// earlier catalog get a fresh id.
    fn load_all(&self) -> Result<LoadedCatalogs> {
        let mut loaded = LoadedCatalogs::default();
        let mut seen = HashSet::new();

        for name in self.list_names()? {
            match self.load(&name) {
                Ok(Some(mut catalog)) => {
                    let reissued = catalog.reissue_duplicate_ids(&mut seen);
                    if reissued > 0 {
                        tracing::info!(
                            "Catalog {:?} shares {} sheet ids with another catalog, reissued",
                            name,
                            reissued
                        );
                    }
                    loaded.catalogs.push(catalog);
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!("Skipping unreadable catalog {:?}: {}", name, error);
                    loaded.failures.push((name, error));
                }
            }
        }

        match loaded.catalogs.iter().position(Catalog::is_default) {
            Some(index) => {
                let default = loaded.catalogs.remove(index);
                loaded.catalogs.insert(0, default);
            }
            None => {
                let default = Catalog::new(DEFAULT_CATALOG);
                if loaded.failures.iter().any(|(name, _)| name == DEFAULT_CATALOG)
                    && let Some(moved) = self.set_aside(DEFAULT_CATALOG)?
                {
                    tracing::warn!(
                        "Unreadable {} catalog moved to {}",
                        DEFAULT_CATALOG,
                        moved
                    );
                }
                self.save(&default)?;
                tracing::info!("Created empty {} catalog", DEFAULT_CATALOG);
                loaded.catalogs.insert(0, default);
            }
        }

        Ok(loaded)
    }
}
