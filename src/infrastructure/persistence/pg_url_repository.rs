//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for short link storage.
///
/// Queries are runtime-bound prepared statements. The unique index on
/// `slug` turns concurrent inserts of the same slug into an
/// [`AppError::Conflict`], and the conditional UPDATE in
/// [`expire_by_slug`](UrlRepository::expire_by_slug) makes early expiry
/// atomic without in-process coordination.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let url = sqlx::query_as::<_, ShortUrl>(
            r#"
            INSERT INTO short_urls (slug, target_url, password_hash, manage_token_hash, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, slug, target_url, password_hash, manage_token_hash, expires_at, created_at
            "#,
        )
        .bind(&new_url.slug)
        .bind(&new_url.target_url)
        .bind(&new_url.password_hash)
        .bind(&new_url.manage_token_hash)
        .bind(new_url.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortUrl>, AppError> {
        let url = sqlx::query_as::<_, ShortUrl>(
            r#"
            SELECT id, slug, target_url, password_hash, manage_token_hash, expires_at, created_at
            FROM short_urls
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM short_urls WHERE slug = $1)",
        )
        .bind(slug)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn expire_by_slug(&self, slug: &str, manage_token_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE short_urls
            SET expires_at = NOW()
            WHERE slug = $1 AND manage_token_hash = $2 AND expires_at > NOW()
            "#,
        )
        .bind(slug)
        .bind(manage_token_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM short_urls WHERE expires_at < NOW()")
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
