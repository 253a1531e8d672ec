//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::infrastructure::cache::UrlCache;

/// State shared across all request handlers.
///
/// Cloning is cheap; every field is an `Arc` or a small string.
#[derive(Clone)]
pub struct AppState {
    /// Short link business logic.
    pub urls: Arc<UrlService>,
    /// Cache handle, used directly only by the health check.
    pub cache: Arc<dyn UrlCache>,
    /// Base URL of the frontend, target of gate and 404 redirects.
    pub frontend_url: String,
}
