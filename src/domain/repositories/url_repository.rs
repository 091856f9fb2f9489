//! Repository trait for URL record storage.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Store capability shared by every backend.
///
/// The store is the only owner of record state. Each operation runs as one
/// atomic step with respect to every other operation on the same store, so
/// concurrent callers never observe half-applied mutations or lose click
/// updates.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - process memory only
/// - [`crate::infrastructure::persistence::FileUrlRepository`] - JSON snapshot on disk
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_memory.rs`, `tests/repository_file.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Creates and persists a record for an already-normalized URL.
    ///
    /// The store assigns the id, the creation time and a short code that is
    /// unique among live records. The uniqueness check and the insert happen
    /// under the same lock.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::GenerationExhausted`] if no free code was found
    /// within the retry bound.
    ///
    /// Returns [`AppError::Storage`] if the record could not be committed.
    async fn create(&self, original_url: &str) -> Result<UrlRecord, AppError>;

    /// Finds a record by its exact short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if not found
    async fn lookup(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its id.
    async fn lookup_by_id(&self, id: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Increments the click counter of a record and returns the updated copy.
    ///
    /// Returns `Ok(None)` without any write if the code does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the new count could not be committed;
    /// the stored count is unchanged in that case.
    async fn increment_clicks(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Removes a record.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if the code was
    /// absent. Deleting an absent code performs no write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the removal could not be committed.
    async fn delete(&self, short_code: &str) -> Result<bool, AppError>;

    /// Lists all live records, newest first.
    ///
    /// Records with equal `created_at` are ordered by insertion, most recent
    /// insertion first.
    async fn list_all(&self) -> Result<Vec<UrlRecord>, AppError>;

    /// Number of live records.
    async fn count(&self) -> Result<usize, AppError>;
}
