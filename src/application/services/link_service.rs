//! Link management service: listing, lookup and deletion.

use std::sync::Arc;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Service for browsing and removing stored links.
pub struct LinkService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns every live record, newest first.
    pub async fn list_links(&self) -> Result<Vec<UrlRecord>, AppError> {
        self.repository.list_all().await
    }

    /// Retrieves a record without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    pub async fn get_link(&self, short_code: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .lookup(short_code)
            .await?
            .ok_or_else(|| AppError::not_found(short_code))
    }

    /// Deletes a record. Returns whether anything was removed.
    pub async fn delete_link(&self, short_code: &str) -> Result<bool, AppError> {
        let deleted = self.repository.delete(short_code).await?;

        if deleted {
            tracing::info!(short_code, "Deleted short link");
        }

        Ok(deleted)
    }

    /// Number of live records.
    pub async fn count_links(&self) -> Result<usize, AppError> {
        self.repository.count().await
    }

    /// Builds the public short URL for a code.
    pub fn get_short_url(&self, base_url: &str, short_code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), short_code)
    }
}
