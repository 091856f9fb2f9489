//! URL record entity, the stored association between a short code and its destination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL with its click counter.
///
/// Field names are the storage and wire contract: they appear verbatim in the
/// JSON snapshot file and in API responses.
///
/// Everything except `clicks` is fixed at creation. Stores hand out clones, so
/// holding a `UrlRecord` never aliases stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub id: String,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub clicks: u64,
}

impl UrlRecord {
    /// Creates a record with a zero click count.
    pub fn new(
        id: String,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
            clicks: 0,
        }
    }
}
