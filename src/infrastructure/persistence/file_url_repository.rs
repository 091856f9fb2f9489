//! JSON-file implementation of the URL repository.
//!
//! The whole store is one document, `{ "urls": [ ... ] }`, rewritten on every
//! mutation. Writes go to a temporary file in the same directory which is
//! fsynced and then renamed over the target, so a crash leaves either the old
//! or the new document on disk, never a truncated one.
//!
//! The repository keeps the parsed table in memory behind a single mutex and
//! never rereads the file after opening it. Mutations run on their own task,
//! so a caller that gives up mid-write cannot leave the file ahead of memory. It is safe for concurrent use
//! within one process, but two processes sharing the same file will overwrite
//! each other's changes.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::url_table::UrlTable;
use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, StorageError};
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

/// On-disk document layout.
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    urls: Vec<UrlRecord>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    urls: Vec<&'a UrlRecord>,
}

/// Repository persisting records to a JSON snapshot file.
pub struct FileUrlRepository {
    path: PathBuf,
    table: Arc<Mutex<UrlTable>>,
    generator: Arc<dyn CodeGenerator>,
}

impl FileUrlRepository {
    /// Opens the snapshot at `path`, creating an empty one if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if the existing file is not a
    /// valid snapshot; the file is left untouched in that case.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Self::open_with_generator(path, Arc::new(RandomCodeGenerator)).await
    }

    /// Like [`Self::open`], drawing short codes from `generator`.
    pub async fn open_with_generator(
        path: impl Into<PathBuf>,
        generator: Arc<dyn CodeGenerator>,
    ) -> Result<Self, StorageError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let table = match tokio::fs::read(&path).await {
            Ok(bytes) => parse_snapshot(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Snapshot file not found, creating empty store");
                let table = UrlTable::new();
                write_snapshot(path.clone(), encode_snapshot(&table)?).await?;
                table
            }
            Err(e) => return Err(e.into()),
        };

        info!(path = %path.display(), records = table.len(), "Loaded URL records");

        Ok(Self {
            path,
            table: Arc::new(Mutex::new(table)),
            generator,
        })
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs one mutation to completion on a detached task.
    ///
    /// `change` sees the current table and returns its result together with
    /// the replacement table, or `None` when nothing changed. A replacement is
    /// swapped in only after it has been written to disk. Dropping the
    /// returned future does not interrupt the task, so the file and the
    /// in-memory table always end up agreeing.
    async fn mutate<T, F>(&self, change: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&UrlTable) -> Result<(T, Option<UrlTable>), AppError> + Send + 'static,
    {
        let table = Arc::clone(&self.table);
        let path = self.path.clone();

        tokio::spawn(async move {
            let mut table = table.lock().await;

            let (result, next) = change(&table)?;
            if let Some(next) = next {
                write_snapshot(path, encode_snapshot(&next)?).await?;
                *table = next;
            }

            Ok::<T, AppError>(result)
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

fn parse_snapshot(bytes: &[u8]) -> Result<UrlTable, StorageError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        warn!("Snapshot file is empty, starting with no records");
        return Ok(UrlTable::new());
    }

    let snapshot: Snapshot = serde_json::from_slice(bytes)?;
    Ok(UrlTable::from_records(snapshot.urls))
}

fn encode_snapshot(table: &UrlTable) -> Result<Vec<u8>, StorageError> {
    let snapshot = SnapshotRef {
        urls: table.in_insertion_order(),
    };
    Ok(serde_json::to_vec_pretty(&snapshot)?)
}

async fn write_snapshot(path: PathBuf, bytes: Vec<u8>) -> Result<(), StorageError> {
    tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
}

/// Replaces `path` with `bytes` via write-temp-then-rename.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    #[cfg(unix)]
    std::fs::File::open(dir)?.sync_all()?;

    Ok(())
}

#[async_trait]
impl UrlRepository for FileUrlRepository {
    async fn create(&self, original_url: &str) -> Result<UrlRecord, AppError> {
        let generator = self.generator.clone();
        let original_url = original_url.to_string();

        let record = self
            .mutate(move |table| {
                let mut next = table.clone();
                let record = next.insert_new(generator.as_ref(), &original_url, Utc::now())?;
                Ok((record, Some(next)))
            })
            .await?;

        debug!(short_code = %record.short_code, id = %record.id, "Created URL record");
        Ok(record)
    }

    async fn lookup(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.table.lock().await.get(short_code).cloned())
    }

    async fn lookup_by_id(&self, id: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.table.lock().await.get_by_id(id).cloned())
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError> {
        let short_code = short_code.to_string();

        self.mutate(move |table| {
            if !table.contains(&short_code) {
                return Ok((None, None));
            }

            let mut next = table.clone();
            let updated = next.increment_clicks(&short_code);
            Ok((updated, Some(next)))
        })
        .await
    }

    async fn delete(&self, short_code: &str) -> Result<bool, AppError> {
        let code = short_code.to_string();

        let deleted = self
            .mutate(move |table| {
                if !table.contains(&code) {
                    return Ok((false, None));
                }

                let mut next = table.clone();
                next.remove(&code);
                Ok((true, Some(next)))
            })
            .await?;

        if deleted {
            debug!(short_code, "Deleted URL record");
        }
        Ok(deleted)
    }

    async fn list_all(&self) -> Result<Vec<UrlRecord>, AppError> {
        Ok(self.table.lock().await.newest_first())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.table.lock().await.len())
    }
}
