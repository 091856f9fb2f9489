//! Handler for click tracking endpoint used by client-side redirects.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::links::ShortCodeRequest;
use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use crate::state::AppState;

/// Counts a visit and returns the destination record.
///
/// # Endpoint
///
/// `POST /api/click`
///
/// # Request Body
///
/// ```json
/// { "shortCode": "Uakgb_J5" }
/// ```
///
/// The response is the record with its already-incremented `clicks`; the
/// caller performs the navigation itself.
///
/// # Errors
///
/// Returns 400 Bad Request if `shortCode` is missing or null, or the body is not JSON.
/// Returns 404 Not Found if the code does not exist.
pub async fn click_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortCodeRequest>, JsonRejection>,
) -> Result<Json<UrlRecord>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let record = state.redirect_service.resolve(&payload.short_code).await?;

    Ok(Json(record))
}
