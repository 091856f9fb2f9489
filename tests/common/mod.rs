#![allow(dead_code)]

use axum::{Router, routing::get};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use snaplink::api::handlers::{health_handler, redirect_handler};
use snaplink::api::routes::api_routes;
use snaplink::domain::repositories::UrlRepository;
use snaplink::infrastructure::persistence::MemoryUrlRepository;
use snaplink::state::AppState;
use snaplink::utils::code_generator::CodeGenerator;

pub const TEST_BASE_URL: &str = "https://s.example.com";

/// Generator cycling through a fixed list of codes.
pub struct CyclingGenerator {
    codes: Vec<&'static str>,
    next: AtomicUsize,
}

impl CyclingGenerator {
    pub fn new(codes: Vec<&'static str>) -> Self {
        Self {
            codes,
            next: AtomicUsize::new(0),
        }
    }
}

impl CodeGenerator for CyclingGenerator {
    fn generate(&self) -> String {
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.codes.len();
        self.codes[index].to_string()
    }
}

pub fn create_test_state() -> AppState {
    create_state_with(Arc::new(MemoryUrlRepository::new()))
}

pub fn create_state_with(repository: Arc<dyn UrlRepository>) -> AppState {
    AppState::new(repository, TEST_BASE_URL)
}

/// Router with every route mounted, without the outer middleware stack.
pub fn test_app(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state)
}
