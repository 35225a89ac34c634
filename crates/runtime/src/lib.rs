//! Edit sessions and catalog persistence for the wargame builder.
//!
//! This crate layers drafts and storage on top of the pure `sheet-core`
//! model. Frontends open an [`EditSession`] from a [`RuntimeConfig`], render
//! its [`SessionState`] snapshots, and drive it exclusively through session
//! commands.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the draft/commit store
//! - [`repository`] provides catalog storage backends
//! - [`config`] reads runtime settings from the environment
//! - [`api`] exposes the error types downstream clients interact with
pub mod api;
pub mod config;
pub mod repository;
pub mod session;

pub use api::{Result, RuntimeError};
pub use config::{PersistenceMode, RuntimeConfig};
pub use repository::{
    CatalogRepository, FileCatalogRepository, InMemoryCatalogRepository, LoadedCatalogs,
    RepositoryError,
};
pub use session::{EditSession, SessionError, SessionState, SheetDraft};
