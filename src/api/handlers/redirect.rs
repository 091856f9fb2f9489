//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Every successful request counts one click before the
/// 307 Temporary Redirect is sent. Non-ASCII destinations are sent in their
/// encoded form (punycode host, percent-encoded path).
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.redirect_service.resolve(&code).await?;

    let location = Url::parse(&record.original_url)
        .map(String::from)
        .unwrap_or_else(|_| record.original_url.clone());

    let location = HeaderValue::try_from(location).map_err(|e| AppError::InvalidUrl {
        url: record.original_url.clone(),
        reason: e.to_string(),
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]))
}
