//! Shared test fixtures: in-memory repository and cache fakes.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::Router;
use axum::routing::{get, post};
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::json;

use sniplink::api::handlers::health::health_handler;
use sniplink::api::handlers::redirect::{redirect_handler, root_handler};
use sniplink::api::handlers::urls::{
    check_slug_handler, create_url_handler, expire_url_handler, unlock_url_handler,
};
use sniplink::application::services::UrlService;
use sniplink::domain::entities::{CachedUrl, NewShortUrl, ShortUrl};
use sniplink::domain::repositories::UrlRepository;
use sniplink::error::AppError;
use sniplink::infrastructure::cache::{CacheResult, UrlCache};
use sniplink::state::AppState;
use sniplink::utils::slug::hash_manage_token;

pub const BASE_URL: &str = "https://snip.test";
pub const FRONTEND_URL: &str = "https://app.snip.test";

/// In-memory repository with the same semantics as the Postgres one:
/// unique slugs, conditional early expiry, expiry-based deletion.
#[derive(Default)]
pub struct MemoryRepository {
    rows: Mutex<HashMap<String, ShortUrl>>,
    next_id: AtomicI64,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row directly, bypassing the service layer.
    pub fn insert_raw(&self, row: ShortUrl) {
        self.rows.lock().unwrap().insert(row.slug.clone(), row);
    }

    pub fn get(&self, slug: &str) -> Option<ShortUrl> {
        self.rows.lock().unwrap().get(slug).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl UrlRepository for MemoryRepository {
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&new_url.slug) {
            return Err(AppError::conflict(
                "Slug already exists",
                json!({ "slug": new_url.slug }),
            ));
        }

        let row = ShortUrl {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            slug: new_url.slug.clone(),
            target_url: new_url.target_url,
            password_hash: new_url.password_hash,
            manage_token_hash: new_url.manage_token_hash,
            expires_at: new_url.expires_at,
            created_at: Utc::now(),
        };
        rows.insert(new_url.slug, row.clone());
        Ok(row)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortUrl>, AppError> {
        Ok(self.rows.lock().unwrap().get(slug).cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        Ok(self.rows.lock().unwrap().contains_key(slug))
    }

    async fn expire_by_slug(&self, slug: &str, manage_token_hash: &str) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(slug) {
            Some(row)
                if row.manage_token_hash == manage_token_hash && row.expires_at > Utc::now() =>
            {
                row.expires_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_expired(&self) -> Result<u64, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        let now = Utc::now();
        rows.retain(|_, row| row.expires_at >= now);
        Ok((before - rows.len()) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// In-memory cache honoring per-entry TTL deadlines.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (CachedUrl, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .get(slug)
            .is_some_and(|(_, deadline)| *deadline > Instant::now())
    }

    /// Inserts an entry directly with the given TTL.
    pub fn insert_raw(&self, slug: &str, entry: CachedUrl, ttl: Duration) {
        self.entries
            .lock()
            .unwrap()
            .insert(slug.to_string(), (entry, Instant::now() + ttl));
    }

    /// Remaining lifetime of an entry, if present and live.
    pub fn ttl_of(&self, slug: &str) -> Option<Duration> {
        self.entries
            .lock()
            .unwrap()
            .get(slug)
            .and_then(|(_, deadline)| deadline.checked_duration_since(Instant::now()))
    }
}

#[async_trait]
impl UrlCache for MemoryCache {
    async fn get(&self, slug: &str) -> CacheResult<Option<CachedUrl>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(slug)
            .filter(|(_, deadline)| *deadline > Instant::now())
            .map(|(entry, _)| entry.clone()))
    }

    async fn set(&self, slug: &str, entry: &CachedUrl, ttl: Duration) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(slug.to_string(), (entry.clone(), Instant::now() + ttl));
        Ok(())
    }

    async fn invalidate(&self, slug: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(slug);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Application state backed by the in-memory fakes, plus direct handles
/// to them for assertions.
pub struct TestContext {
    pub state: AppState,
    pub repo: Arc<MemoryRepository>,
    pub cache: Arc<MemoryCache>,
}

pub fn create_test_state() -> TestContext {
    let repo = Arc::new(MemoryRepository::new());
    let cache = Arc::new(MemoryCache::new());

    let urls = Arc::new(UrlService::new(
        repo.clone(),
        cache.clone(),
        BASE_URL.to_string(),
    ));

    TestContext {
        state: AppState {
            urls,
            cache: cache.clone(),
            frontend_url: FRONTEND_URL.to_string(),
        },
        repo,
        cache,
    }
}

/// Production routes minus the rate limiter, which needs socket peer
/// info that `TestServer` does not provide.
pub fn test_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/urls", post(create_url_handler))
        .route("/urls/check/{slug}", get(check_slug_handler))
        .route("/urls/{slug}/unlock", post(unlock_url_handler))
        .route("/urls/{slug}/expire", post(expire_url_handler))
        .route("/health", get(health_handler));

    Router::new()
        .route("/", get(root_handler))
        .route("/{slug}", get(redirect_handler))
        .nest("/api/v1", api)
        .with_state(state)
}

/// Builds a row expiring `expires_in_secs` from now, managed by the
/// token `"test-token"`.
pub fn make_row(slug: &str, target: &str, expires_in_secs: i64) -> ShortUrl {
    ShortUrl {
        id: 0,
        slug: slug.to_string(),
        target_url: target.to_string(),
        password_hash: None,
        manage_token_hash: hash_manage_token("test-token"),
        expires_at: Utc::now() + ChronoDuration::seconds(expires_in_secs),
        created_at: Utc::now(),
    }
}
