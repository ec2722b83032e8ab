//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::CacheService;

/// Application state cloned into each request.
///
/// Everything behind an `Arc`; the engine itself holds no per-request state.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub repository: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            link_service,
            repository,
            cache,
        }
    }
}
