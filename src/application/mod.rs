//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::UrlRepository`] trait
//! and hold no state of their own, so they are safe to share across tasks.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - URL validation, normalization and creation
//! - [`services::redirect_service::RedirectService`] - Click-counting resolution of short codes
//! - [`services::link_service::LinkService`] - Listing, lookup and deletion

pub mod services;
