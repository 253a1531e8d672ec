//! Repository trait for short link data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for short links.
///
/// Slug uniqueness and the conditional early-expire update are delegated
/// to the store's native guarantees; no in-process locking is layered on
/// top.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - In-memory fakes in the integration test suite
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the slug is already taken and
    /// [`AppError::Internal`] on other database errors.
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Finds a link by slug, expired or not. Liveness is the caller's
    /// concern.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Whether any record, live or expired, currently occupies the slug.
    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError>;

    /// Conditionally sets `expires_at = now()` when the slug exists, the
    /// management token hash matches, and the record is still live.
    ///
    /// Returns `Ok(true)` only when a row was updated.
    async fn expire_by_slug(&self, slug: &str, manage_token_hash: &str) -> Result<bool, AppError>;

    /// Deletes every expired record in one statement, returning the number
    /// removed.
    async fn delete_expired(&self) -> Result<u64, AppError>;

    /// Cheap connectivity probe for health reporting.
    async fn ping(&self) -> Result<(), AppError>;
}
