//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// Request to shorten a single URL.
///
/// A missing or `null` `url` field is treated as empty input.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(length(max = 8192, message = "URL is too long"))]
    pub url: String,
}

/// A stored record together with its public short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    #[serde(flatten)]
    pub record: UrlRecord,
    pub short_url: String,
}
