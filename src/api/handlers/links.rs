//! Handlers for link management endpoints (list, lookup, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::links::{DeleteResponse, ShortCodeRequest};
use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every stored link, newest first.
///
/// # Endpoint
///
/// `GET /api/urls`
pub async fn list_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlRecord>>, AppError> {
    let records = state.link_service.list_links().await?;
    Ok(Json(records))
}

/// Returns a single link without counting a click.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlRecord>, AppError> {
    let record = state.link_service.get_link(&code).await?;
    Ok(Json(record))
}

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /api/delete`
///
/// # Request Body
///
/// ```json
/// { "shortCode": "Uakgb_J5" }
/// ```
///
/// The record is removed for good; later lookups of the code fail.
///
/// # Errors
///
/// Returns 400 Bad Request if `shortCode` is missing or null, or the body is not JSON.
/// Returns 404 Not Found if there was nothing to delete.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortCodeRequest>, JsonRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    if !state.link_service.delete_link(&payload.short_code).await? {
        return Err(AppError::not_found(payload.short_code));
    }

    Ok(Json(DeleteResponse { success: true }))
}
