//! Cache strategy trait and error types.

use crate::domain::entities::CachedUrl;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Fast-path lookup strategy for short links.
///
/// The cache is never authoritative: a miss, or any failure, routes the
/// read to the durable store. Implementations are fail-open and must not
/// disrupt request handling.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with per-entry TTLs
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlCache: Send + Sync {
    /// Looks up the cached projection for a slug.
    ///
    /// Returns `Ok(None)` on a miss. Production implementations log
    /// backend errors and report them as misses.
    async fn get(&self, slug: &str) -> CacheResult<Option<CachedUrl>>;

    /// Stores the projection under the slug for `ttl`. Best-effort:
    /// callers treat failures as degraded, not fatal.
    async fn set(&self, slug: &str, entry: &CachedUrl, ttl: Duration) -> CacheResult<()>;

    /// Drops the cached entry for a slug, if any.
    async fn invalidate(&self, slug: &str) -> CacheResult<()>;

    /// Whether the backend currently answers.
    async fn health_check(&self) -> bool;
}
