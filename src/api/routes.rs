//! API route configuration.

use crate::api::handlers::{
    click_handler, delete_link_handler, get_link_handler, list_urls_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// All JSON API routes.
///
/// # Endpoints
///
/// - `POST   /shorten`       - Create a short link
/// - `GET    /urls`          - List all links, newest first
/// - `POST   /click`         - Count a visit and return the destination
/// - `DELETE /delete`        - Delete a link
/// - `GET    /links/{code}`  - Inspect a link without counting a click
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_urls_handler))
        .route("/click", post(click_handler))
        .route("/delete", delete(delete_link_handler))
        .route("/links/{code}", get(get_link_handler))
}
