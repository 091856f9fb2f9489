//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService, ShortenService};
use crate::domain::repositories::UrlRepository;

/// Services built over one shared repository instance.
///
/// Cloning is cheap; every clone refers to the same store.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService<dyn UrlRepository>>,
    pub redirect_service: Arc<RedirectService<dyn UrlRepository>>,
    pub link_service: Arc<LinkService<dyn UrlRepository>>,
    pub base_url: String,
}

impl AppState {
    /// Wires all services to `repository`.
    pub fn new(repository: Arc<dyn UrlRepository>, base_url: impl Into<String>) -> Self {
        Self {
            shorten_service: Arc::new(ShortenService::new(repository.clone())),
            redirect_service: Arc::new(RedirectService::new(repository.clone())),
            link_service: Arc::new(LinkService::new(repository)),
            base_url: base_url.into(),
        }
    }

    /// Public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        self.link_service.get_short_url(&self.base_url, short_code)
    }
}
