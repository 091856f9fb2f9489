//! URL repository implementations.
//!
//! # Repositories
//!
//! - [`MemoryUrlRepository`] - Records held in process memory
//! - [`FileUrlRepository`] - Records persisted to an atomically rewritten JSON file
//!
//! Both share the [`UrlTable`] index, so ordering, collision handling and
//! click accounting behave identically regardless of backend.

pub mod file_url_repository;
pub mod memory_url_repository;
pub mod url_table;

pub use file_url_repository::FileUrlRepository;
pub use memory_url_repository::MemoryUrlRepository;
pub use url_table::UrlTable;
