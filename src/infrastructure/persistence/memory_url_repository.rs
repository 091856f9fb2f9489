//! In-memory implementation of the URL repository.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::url_table::UrlTable;
use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

/// Repository keeping all records in process memory.
///
/// A single store-wide `RwLock` serializes mutations; reads run concurrently.
/// Contents are lost when the process exits.
pub struct MemoryUrlRepository {
    table: RwLock<UrlTable>,
    generator: Arc<dyn CodeGenerator>,
}

impl MemoryUrlRepository {
    /// Creates an empty repository using random short codes.
    pub fn new() -> Self {
        Self::with_generator(Arc::new(RandomCodeGenerator))
    }

    /// Creates an empty repository drawing short codes from `generator`.
    pub fn with_generator(generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            table: RwLock::new(UrlTable::new()),
            generator,
        }
    }
}

impl Default for MemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn create(&self, original_url: &str) -> Result<UrlRecord, AppError> {
        let mut table = self.table.write().await;
        let record = table.insert_new(self.generator.as_ref(), original_url, Utc::now())?;

        debug!(short_code = %record.short_code, id = %record.id, "Created URL record");
        Ok(record)
    }

    async fn lookup(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.table.read().await.get(short_code).cloned())
    }

    async fn lookup_by_id(&self, id: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.table.read().await.get_by_id(id).cloned())
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.table.write().await.increment_clicks(short_code))
    }

    async fn delete(&self, short_code: &str) -> Result<bool, AppError> {
        let removed = self.table.write().await.remove(short_code).is_some();
        if removed {
            debug!(short_code, "Deleted URL record");
        }
        Ok(removed)
    }

    async fn list_all(&self) -> Result<Vec<UrlRecord>, AppError> {
        Ok(self.table.read().await.newest_first())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.table.read().await.len())
    }
}
