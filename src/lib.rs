//! # Snaplink
//!
//! A small URL shortener: long URLs are mapped to 8-character short codes,
//! visitors following a code are redirected, and every visit is counted.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The `UrlRecord` entity and the repository trait
//! - **Application Layer** ([`application`]) - Shortening, resolution and link management
//! - **Infrastructure Layer** ([`infrastructure`]) - Memory and JSON-file stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Guarantees
//!
//! - Short codes are unique among live records; collisions are retried
//! - Concurrent clicks on one code are never lost
//! - The file store replaces its snapshot atomically on every mutation
//!
//! ## Quick Start
//!
//! ```bash
//! export STORAGE_BACKEND="file"
//! export STORAGE_FILE="data/urls.json"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, RedirectService, ShortenService};
    pub use crate::domain::entities::UrlRecord;
    pub use crate::domain::repositories::UrlRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{FileUrlRepository, MemoryUrlRepository};
    pub use crate::state::AppState;
}
