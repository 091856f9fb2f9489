//! DTOs for click tracking and link deletion endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};
use validator::Validate;

/// Request body naming a short code, as sent by the web client.
///
/// A missing or `null` code deserializes as empty and fails validation.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct ShortCodeRequest {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "shortCode", default)]
    #[validate(length(min = 1, max = 64, message = "Short code is required"))]
    pub short_code: String,
}

/// Result of a successful deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}
