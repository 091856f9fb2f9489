//! In-memory index of URL records shared by every repository backend.

use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::HashMap;

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, allocate_unique_code, generate_id};

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    record: UrlRecord,
}

/// Records indexed by short code, with a secondary id index.
///
/// Every entry carries an insertion sequence number used to break ordering
/// ties between records created within the same clock tick.
///
/// The table is not synchronized; repositories wrap it in a lock.
#[derive(Debug, Clone, Default)]
pub struct UrlTable {
    by_code: HashMap<String, Entry>,
    code_by_id: HashMap<String, String>,
    next_seq: u64,
}

impl UrlTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from records in insertion order.
    ///
    /// When two records share a short code only the first one is kept, since
    /// it is the one a lookup would have found.
    pub fn from_records(records: impl IntoIterator<Item = UrlRecord>) -> Self {
        let mut table = Self::new();

        for record in records {
            if table.by_code.contains_key(&record.short_code) {
                tracing::warn!(
                    short_code = %record.short_code,
                    id = %record.id,
                    "Dropping record with duplicate short code"
                );
                continue;
            }
            table.insert(record);
        }

        table
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn contains(&self, short_code: &str) -> bool {
        self.by_code.contains_key(short_code)
    }

    /// Creates a record with a fresh id and a short code that is free in this table.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::GenerationExhausted`] when the generator keeps
    /// producing taken codes.
    pub fn insert_new(
        &mut self,
        generator: &dyn CodeGenerator,
        original_url: &str,
        created_at: DateTime<Utc>,
    ) -> Result<UrlRecord, AppError> {
        let short_code = allocate_unique_code(generator, |code| self.by_code.contains_key(code))?;

        let mut id = generate_id();
        while self.code_by_id.contains_key(&id) {
            id = generate_id();
        }

        let record = UrlRecord::new(id, original_url.to_string(), short_code, created_at);
        self.insert(record.clone());

        Ok(record)
    }

    fn insert(&mut self, record: UrlRecord) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.code_by_id
            .insert(record.id.clone(), record.short_code.clone());
        self.by_code
            .insert(record.short_code.clone(), Entry { seq, record });
    }

    pub fn get(&self, short_code: &str) -> Option<&UrlRecord> {
        self.by_code.get(short_code).map(|entry| &entry.record)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&UrlRecord> {
        self.code_by_id.get(id).and_then(|code| self.get(code))
    }

    /// Adds one click and returns the updated record.
    pub fn increment_clicks(&mut self, short_code: &str) -> Option<UrlRecord> {
        let entry = self.by_code.get_mut(short_code)?;
        entry.record.clicks = entry.record.clicks.saturating_add(1);
        Some(entry.record.clone())
    }

    pub fn remove(&mut self, short_code: &str) -> Option<UrlRecord> {
        let entry = self.by_code.remove(short_code)?;
        self.code_by_id.remove(&entry.record.id);
        Some(entry.record)
    }

    /// Records ordered by `created_at` descending, then by insertion descending.
    pub fn newest_first(&self) -> Vec<UrlRecord> {
        let mut entries: Vec<&Entry> = self.by_code.values().collect();
        entries.sort_unstable_by_key(|entry| Reverse((entry.record.created_at, entry.seq)));
        entries.into_iter().map(|entry| entry.record.clone()).collect()
    }

    /// Records in the order they were inserted.
    pub fn in_insertion_order(&self) -> Vec<&UrlRecord> {
        let mut entries: Vec<&Entry> = self.by_code.values().collect();
        entries.sort_unstable_by_key(|entry| entry.seq);
        entries.into_iter().map(|entry| &entry.record).collect()
    }
}
