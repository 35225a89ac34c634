//! Runtime configuration structures and loaders.

use std::env;
use std::path::PathBuf;

use crate::api::{Result, RuntimeError};
use crate::repository::{CatalogRepository, FileCatalogRepository, InMemoryCatalogRepository};
use crate::session::EditSession;

/// Application name used for platform directories.
pub const APP_NAME: &str = "wargame-builder";

/// Subdirectory of the data directory holding catalog files.
pub const CATALOGS_DIR: &str = "Catalogs";

/// Where catalogs are kept.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PersistenceMode {
    /// One JSON file per catalog under [`RuntimeConfig::data_dir`].
    #[default]
    File,
    /// Nothing is written to disk; catalogs vanish on exit.
    Memory,
}

/// Configuration required to open an edit session.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub persistence: PersistenceMode,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            persistence: PersistenceMode::default(),
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WARGAME_DATA_DIR` - Catalog directory (default: platform data dir + `Catalogs`)
    /// - `WARGAME_PERSISTENCE` - `file` or `memory` (default: file)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = env::var("WARGAME_DATA_DIR")
            && !dir.trim().is_empty()
        {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(value) = env::var("WARGAME_PERSISTENCE") {
            config.persistence = match value.trim().parse::<PersistenceMode>() {
                Ok(mode) => mode,
                Err(_) => {
                    return Err(RuntimeError::InvalidConfig {
                        key: "WARGAME_PERSISTENCE",
                        value,
                    });
                }
            };
        }

        Ok(config)
    }

    /// Opens the repository selected by [`RuntimeConfig::persistence`].
    pub fn open_repository(&self) -> Result<Box<dyn CatalogRepository>> {
        let repository: Box<dyn CatalogRepository> = match self.persistence {
            PersistenceMode::File => Box::new(FileCatalogRepository::new(&self.data_dir)?),
            PersistenceMode::Memory => Box::new(InMemoryCatalogRepository::new()),
        };
        tracing::debug!(
            "Opened {} catalog repository at {}",
            self.persistence,
            self.data_dir.display()
        );
        Ok(repository)
    }

    /// Opens the repository and builds an unloaded session over it.
    pub fn open_session(&self) -> Result<EditSession> {
        Ok(EditSession::new(self.open_repository()?))
    }
}

/// Platform data directory joined with [`CATALOGS_DIR`].
///
/// - macOS: `~/Library/Application Support/wargame-builder/Catalogs`
/// - Linux: `~/.local/share/wargame-builder/Catalogs`
/// - Windows: `%APPDATA%\wargame-builder\data\Catalogs`
/// - Fallback: `./save_data/Catalogs`
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
        .join(CATALOGS_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_mode_parses_case_insensitively() {
        assert_eq!("file".parse::<PersistenceMode>(), Ok(PersistenceMode::File));
        assert_eq!("Memory".parse::<PersistenceMode>(), Ok(PersistenceMode::Memory));
        assert!("cloud".parse::<PersistenceMode>().is_err());
        assert_eq!(PersistenceMode::Memory.to_string(), "memory");
    }

    #[test]
    fn default_dir_ends_in_catalogs() {
        assert!(default_data_dir().ends_with(CATALOGS_DIR));
    }

    #[test]
    fn memory_session_needs_no_directory() {
        let config = RuntimeConfig {
            data_dir: PathBuf::from("/nonexistent/never/created"),
            persistence: PersistenceMode::Memory,
        };
        let mut session = config.open_session().unwrap();
        session.load().unwrap();
        assert_eq!(session.snapshot().catalogs().len(), 1);
        assert!(!config.data_dir.exists());
    }
}
