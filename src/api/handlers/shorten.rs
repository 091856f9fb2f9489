//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/page" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": "3q2-7wAAAAD9GSf1bqHkpQ",
///   "original_url": "https://example.com/page",
///   "short_code": "Uakgb_J5",
///   "created_at": "2025-01-01T12:00:00.000Z",
///   "clicks": 0,
///   "short_url": "http://localhost:3000/Uakgb_J5"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is empty, null or malformed, or the body is not JSON.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let record = state.shorten_service.shorten(&payload.url).await?;
    let short_url = state.short_url(&record.short_code);

    Ok(Json(ShortenResponse { record, short_url }))
}
