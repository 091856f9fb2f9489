//! Short code resolution service.

use std::sync::Arc;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Service recording a visit and returning where to send the visitor.
///
/// Emitting the actual redirect is left to the caller.
pub struct RedirectService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Looks up a short code and counts one click in a single store operation.
    ///
    /// A record deleted before this call's store operation runs is reported as
    /// not found; a missing code is never incremented.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Storage`] if the click could not be committed.
    pub async fn resolve(&self, short_code: &str) -> Result<UrlRecord, AppError> {
        let record = self
            .repository
            .increment_clicks(short_code)
            .await?
            .ok_or_else(|| AppError::not_found(short_code))?;

        tracing::debug!(short_code, clicks = record.clicks, "Resolved short code");

        Ok(record)
    }
}
