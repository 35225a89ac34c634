//! In-memory CatalogRepository implementation for tests and ephemeral runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use sheet_core::Catalog;

use crate::repository::{CatalogRepository, RepositoryError, Result, validate_name};

/// In-memory implementation of CatalogRepository.
///
/// Applies the same name rules as the file repository so both behave alike.
pub struct InMemoryCatalogRepository {
    catalogs: RwLock<BTreeMap<String, Catalog>>,
    set_aside: RwLock<Vec<Catalog>>,
}

impl InMemoryCatalogRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::with_catalogs([])
    }

    /// Create pre-populated with `catalogs`.
    pub fn with_catalogs(catalogs: impl IntoIterator<Item = Catalog>) -> Self {
        let catalogs = catalogs
            .into_iter()
            .map(|catalog| (catalog.name.clone(), catalog))
            .collect();
        Self {
            catalogs: RwLock::new(catalogs),
            set_aside: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn list_names(&self) -> Result<Vec<String>> {
        let catalogs = self
            .catalogs
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(catalogs.keys().cloned().collect())
    }

    fn load(&self, name: &str) -> Result<Option<Catalog>> {
        let catalogs = self
            .catalogs
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(catalogs.get(name).cloned())
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        validate_name(&catalog.name)?;
        let mut catalogs = self
            .catalogs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        catalogs.insert(catalog.name.clone(), catalog.clone());
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        let mut catalogs = self
            .catalogs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        catalogs.remove(name);
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.catalogs
            .read()
            .map(|catalogs| catalogs.contains_key(name))
            .unwrap_or(false)
    }

    fn set_aside(&self, name: &str) -> Result<Option<String>> {
        let mut catalogs = self
            .catalogs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let Some(catalog) = catalogs.remove(name) else {
            return Ok(None);
        };
        let mut set_aside = self
            .set_aside
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        set_aside.push(catalog);
        Ok(Some(format!("{name} (set aside #{})", set_aside.len())))
    }
}
