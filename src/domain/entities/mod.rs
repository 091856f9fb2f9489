//! Core domain entities.
//!
//! - [`UrlRecord`] - A short code and the destination it stands for

pub mod url_record;

pub use url_record::UrlRecord;
