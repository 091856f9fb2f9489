//! Link shortening service.

use std::sync::Arc;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::url_normalizer::{UrlNormalizationError, normalize_url};

/// Service turning raw user input into stored short links.
///
/// Validation is pure; the only side effect is the repository insert.
pub struct ShortenService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> ShortenService<R> {
    /// Creates a new shortening service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validates, normalizes and stores a URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmptyInput`] if the input is blank.
    ///
    /// Returns [`AppError::InvalidUrl`] if the normalized URL is malformed or
    /// uses a scheme other than http(s).
    ///
    /// Store errors are propagated unchanged.
    pub async fn shorten(&self, raw_url: &str) -> Result<UrlRecord, AppError> {
        let normalized = normalize_url(raw_url).map_err(|e| match e {
            UrlNormalizationError::Empty => AppError::EmptyInput,
            other => AppError::InvalidUrl {
                url: raw_url.trim().to_string(),
                reason: other.to_string(),
            },
        })?;

        let record = self.repository.create(&normalized).await?;

        tracing::info!(
            short_code = %record.short_code,
            original_url = %record.original_url,
            "Shortened URL"
        );

        Ok(record)
    }
}
