//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheResult, UrlCache};
use crate::domain::entities::CachedUrl;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is unavailable or caching is explicitly disabled. All
/// operations succeed immediately; every read is a miss, so lookups go
/// straight to the durable store.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlCache for NullCache {
    async fn get(&self, _slug: &str) -> CacheResult<Option<CachedUrl>> {
        Ok(None)
    }

    async fn set(&self, _slug: &str, _entry: &CachedUrl, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _slug: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
