//! In-memory repository implementations.

mod catalog;

pub use catalog::InMemoryCatalogRepository;
