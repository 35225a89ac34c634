//! File-based repository implementations.

mod catalog;

pub use catalog::FileCatalogRepository;
