//! File-based CatalogRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use sheet_core::Catalog;

use crate::repository::{CatalogRepository, RepositoryError, Result, validate_name};

const EXTENSION: &str = "json";
const SET_ASIDE_SUFFIX: &str = "corrupt";

/// File-based implementation of CatalogRepository.
///
/// # File Format
///
/// Each catalog is stored as `{name}.json` directly under the base
/// directory. Stat tables keep their parallel-array layout on disk.
pub struct FileCatalogRepository {
    base_dir: PathBuf,
}

impl FileCatalogRepository {
    /// Create a new file-based catalog repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a catalog file.
    fn catalog_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.base_dir.join(format!("{name}.{EXTENSION}")))
    }

    /// First free `{name}.json.corrupt`, `{name}.json.corrupt.1`, ... path.
    fn set_aside_path(&self, name: &str) -> PathBuf {
        let base = format!("{name}.{EXTENSION}.{SET_ASIDE_SUFFIX}");
        let mut path = self.base_dir.join(&base);
        let mut attempt = 0;
        while path.exists() {
            attempt += 1;
            path = self.base_dir.join(format!("{base}.{attempt}"));
        }
        path
    }
}

impl CatalogRepository for FileCatalogRepository {
    fn list_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if path.is_file()
                && path.extension().and_then(|s| s.to_str()) == Some(EXTENSION)
                && let Some(name) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(name.to_string());
            }
        }

        names.sort_unstable();
        Ok(names)
    }

    fn load(&self, name: &str) -> Result<Option<Catalog>> {
        let path = self.catalog_path(name)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let mut catalog: Catalog = serde_json::from_slice(&bytes).map_err(|e| {
            RepositoryError::CorruptedData(format!("{}: {}", path.display(), e))
        })?;

        // The file name is the key
        if catalog.name != name {
            tracing::debug!(
                "Catalog file {} names itself {:?}, using {:?}",
                path.display(),
                catalog.name,
                name
            );
            catalog.name = name.to_string();
        }

        tracing::debug!("Loaded catalog[{}] from {}", name, path.display());

        Ok(Some(catalog))
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        let path = self.catalog_path(&catalog.name)?;
        let temp_path = path.with_extension("json.tmp");

        let bytes =
            serde_json::to_vec_pretty(catalog).map_err(|e| RepositoryError::Json(e.to_string()))?;

        // Write to temp file
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved catalog[{}] to {}", catalog.name, path.display());

        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.catalog_path(name)?;

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted catalog[{}]", name);
        }

        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.catalog_path(name)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    fn set_aside(&self, name: &str) -> Result<Option<String>> {
        let path = self.catalog_path(name)?;

        if !path.exists() {
            return Ok(None);
        }

        let target = self.set_aside_path(name);
        fs::rename(&path, &target).map_err(RepositoryError::Io)?;

        tracing::debug!("Set aside catalog[{}] as {}", name, target.display());

        Ok(Some(target.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_core::{DEFAULT_CATALOG, Datasheet};
    use tempfile::TempDir;

    fn repo() -> (TempDir, FileCatalogRepository) {
        let dir = TempDir::new().unwrap();
        let repo = FileCatalogRepository::new(dir.path().join("Catalogs")).unwrap();
        (dir, repo)
    }

    #[test]
    fn save_then_load() {
        let (_dir, repo) = repo();
        let mut catalog = Catalog::new("Orks");
        catalog.insert_sorted(Datasheet::new("Boyz"));

        repo.save(&catalog).unwrap();

        assert!(repo.exists("Orks"));
        assert!(repo.base_dir().join("Orks.json").is_file());
        assert_eq!(repo.load("Orks").unwrap(), Some(catalog));
        assert_eq!(repo.load("Eldar").unwrap(), None);
    }

    #[test]
    fn stored_file_keeps_parallel_arrays() {
        let (_dir, repo) = repo();
        let mut catalog = Catalog::new("Orks");
        catalog.insert_sorted(Datasheet::new("Boyz"));
        repo.save(&catalog).unwrap();

        let raw = fs::read_to_string(repo.base_dir().join("Orks.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let table = &value["datasheets"][0]["statTable"];

        assert_eq!(table["resultBreaks"], serde_json::json!([1]));
        assert_eq!(table["toResist"], serde_json::json!([null]));
        assert_eq!(table["weapons"][0]["range"], serde_json::json!([3]));
    }

    #[test]
    fn delete_is_idempotent() {
        let (_dir, repo) = repo();
        repo.save(&Catalog::new("Orks")).unwrap();

        repo.delete("Orks").unwrap();
        repo.delete("Orks").unwrap();

        assert!(!repo.exists("Orks"));
    }

    #[test]
    fn list_ignores_foreign_files() {
        let (_dir, repo) = repo();
        repo.save(&Catalog::new("Orks")).unwrap();
        repo.save(&Catalog::new("Eldar")).unwrap();
        fs::write(repo.base_dir().join("notes.txt"), "hello").unwrap();

        assert_eq!(repo.list_names().unwrap(), ["Eldar", "Orks"]);
    }

    #[test]
    fn rejects_unsafe_names() {
        let (_dir, repo) = repo();
        for name in ["", "  ", "../escape", "a/b", "a\\b", ".."] {
            assert!(
                matches!(
                    repo.save(&Catalog::new(name)),
                    Err(RepositoryError::InvalidName(_))
                ),
                "{name:?} accepted"
            );
        }
    }

    #[test]
    fn load_all_pins_and_creates_default() {
        let (_dir, repo) = repo();
        repo.save(&Catalog::new("Alpha")).unwrap();

        let loaded = repo.load_all().unwrap();

        let names: Vec<_> = loaded.catalogs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, [DEFAULT_CATALOG, "Alpha"]);
        assert!(repo.exists(DEFAULT_CATALOG));
        assert!(loaded.failures.is_empty());
    }

    #[test]
    fn corrupt_catalog_does_not_block_others() {
        let (_dir, repo) = repo();
        repo.save(&Catalog::new("Good")).unwrap();
        fs::write(repo.base_dir().join("Broken.json"), "{ not json").unwrap();

        let loaded = repo.load_all().unwrap();

        let names: Vec<_> = loaded.catalogs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, [DEFAULT_CATALOG, "Good"]);
        assert_eq!(loaded.failures.len(), 1);
        assert_eq!(loaded.failures[0].0, "Broken");
        assert!(matches!(
            loaded.failures[0].1,
            RepositoryError::CorruptedData(_)
        ));
    }

    #[test]
    fn corrupt_default_is_set_aside_not_overwritten() {
        let (_dir, repo) = repo();
        let path = repo.base_dir().join("Default.json");
        fs::write(&path, "garbage").unwrap();

        let loaded = repo.load_all().unwrap();

        assert_eq!(loaded.catalogs[0].name, DEFAULT_CATALOG);
        assert_eq!(loaded.failures[0].0, DEFAULT_CATALOG);
        let kept = repo.base_dir().join("Default.json.corrupt");
        assert_eq!(fs::read_to_string(&kept).unwrap(), "garbage");
        assert_eq!(repo.load(DEFAULT_CATALOG).unwrap(), Some(Catalog::new(DEFAULT_CATALOG)));
        assert_eq!(repo.list_names().unwrap(), [DEFAULT_CATALOG]);
    }

    #[test]
    fn set_aside_never_replaces_an_earlier_copy() {
        let (_dir, repo) = repo();
        let path = repo.base_dir().join("Orks.json");

        fs::write(&path, "first").unwrap();
        assert!(repo.set_aside("Orks").unwrap().is_some());
        fs::write(&path, "second").unwrap();
        repo.set_aside("Orks").unwrap();

        let dir = repo.base_dir();
        assert_eq!(fs::read_to_string(dir.join("Orks.json.corrupt")).unwrap(), "first");
        assert_eq!(fs::read_to_string(dir.join("Orks.json.corrupt.1")).unwrap(), "second");
        assert!(!repo.exists("Orks"));
        assert_eq!(repo.set_aside("Orks").unwrap(), None);
    }

    #[test]
    fn copied_catalog_gets_fresh_sheet_ids() {
        let (_dir, repo) = repo();
        let mut catalog = Catalog::new("Orks");
        catalog.insert_sorted(Datasheet::new("Boyz"));
        repo.save(&catalog).unwrap();
        let dir = repo.base_dir();
        fs::copy(dir.join("Orks.json"), dir.join("Orks Copy.json")).unwrap();

        let loaded = repo.load_all().unwrap();

        let ids: Vec<_> = loaded.catalogs[1..]
            .iter()
            .map(|catalog| catalog.get(0).unwrap().id)
            .collect();
        assert_eq!(loaded.catalogs.len(), 3);
        assert_ne!(ids[0], ids[1]);
    }
}
