//! Short link business rules: creation, resolution, gating, revocation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::warn;

use crate::domain::entities::{CachedUrl, NewShortUrl, Ttl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::UrlCache;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::slug::{
    SLUG_MAX_LENGTH, generate_manage_token, generate_slug, hash_manage_token, validate_slug,
};

/// Bound on `slug-2` .. `slug-N` probing before declaring a slug exhausted.
const MAX_COLLISION_TRIES: u32 = 10;

/// Bound on fresh random slugs tried before giving up.
const MAX_AUTO_SLUG_TRIES: u32 = 10;

/// Parameters for creating a short link.
#[derive(Debug, Clone)]
pub struct CreateUrl {
    pub target_url: String,
    pub slug: Option<String>,
    pub ttl: String,
    pub password: Option<String>,
}

/// Outcome of a successful creation.
///
/// `manage_token` is plaintext and revealed exactly once; only its hash is
/// persisted.
#[derive(Debug, Clone)]
pub struct CreatedUrl {
    pub slug: String,
    pub short_url: String,
    pub expires_at: DateTime<Utc>,
    pub protected: bool,
    pub manage_token: String,
}

/// Result of a slug availability check.
#[derive(Debug, Clone)]
pub struct SlugAvailability {
    pub available: bool,
    pub suggestion: Option<String>,
}

/// Service implementing every short link operation over a durable
/// repository and a best-effort cache.
///
/// Both seams are trait objects so tests can substitute either side
/// independently. Cache failures degrade to store reads and never fail a
/// request.
pub struct UrlService {
    repo: Arc<dyn UrlRepository>,
    cache: Arc<dyn UrlCache>,
    base_url: String,
}

impl UrlService {
    pub fn new(repo: Arc<dyn UrlRepository>, cache: Arc<dyn UrlCache>, base_url: String) -> Self {
        Self {
            repo,
            cache,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link.
    ///
    /// Validates the TTL against the whitelist and the target as an
    /// http(s) URL, resolves the slug (generating or suffix-probing as
    /// needed), hashes the password when present, and persists the record
    /// before pre-warming the cache.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a bad TTL, target, or slug format
    /// - [`AppError::Conflict`] when the slug and all probed variants are taken
    /// - [`AppError::Internal`] on store errors
    pub async fn create(&self, req: CreateUrl) -> Result<CreatedUrl, AppError> {
        let ttl = Ttl::parse(&req.ttl).ok_or_else(|| {
            AppError::bad_request(
                "Invalid TTL value",
                json!({ "ttl": req.ttl, "allowed": Ttl::ALL.map(Ttl::as_str) }),
            )
        })?;
        validate_target_url(&req.target_url)?;

        let slug = self.resolve_slug(req.slug.as_deref()).await?;

        let password_hash = match req.password.as_deref() {
            Some(password) if !password.is_empty() => Some(hash_password(password)?),
            _ => None,
        };

        let (manage_token, manage_token_hash) = generate_manage_token();
        let expires_at = Utc::now() + ttl.duration();

        let record = self
            .repo
            .insert(NewShortUrl {
                slug,
                target_url: req.target_url,
                password_hash,
                manage_token_hash,
                expires_at,
            })
            .await?;

        // Pre-warm failure is non-fatal: reads fall back to the store.
        if let Ok(remaining) = record.remaining().to_std() {
            if let Err(e) = self.cache.set(&record.slug, &record.to_cached(), remaining).await {
                warn!(slug = %record.slug, error = %e, "failed to pre-warm cache");
            }
        }

        Ok(CreatedUrl {
            short_url: format!("{}/{}", self.base_url, record.slug),
            protected: record.password_hash.is_some(),
            expires_at: record.expires_at,
            slug: record.slug,
            manage_token,
        })
    }

    /// Cache-aside lookup. Returns `Ok(None)`, not an error, for missing
    /// or expired slugs.
    ///
    /// A cache hit returns immediately; a miss reads the store, checks
    /// liveness, and repopulates the cache with the remaining lifetime.
    /// Cache errors are logged and degrade to a store read.
    pub async fn resolve(&self, slug: &str) -> Result<Option<CachedUrl>, AppError> {
        match self.cache.get(slug).await {
            Ok(Some(cached)) => return Ok(Some(cached)),
            Ok(None) => {}
            Err(e) => warn!(slug, error = %e, "cache read failed, falling back to store"),
        }

        let Some(record) = self.repo.find_by_slug(slug).await? else {
            return Ok(None);
        };

        // The store row is authoritative; an expired record is treated as
        // absent until the sweep removes it.
        if !record.is_live() {
            return Ok(None);
        }

        let cached = record.to_cached();
        if let Ok(remaining) = record.remaining().to_std() {
            if let Err(e) = self.cache.set(slug, &cached, remaining).await {
                warn!(slug, error = %e, "failed to repopulate cache");
            }
        }

        Ok(Some(cached))
    }

    /// Checks a password against a possibly protected link.
    ///
    /// Returns `Ok(None)` when the slug is missing or expired. Unprotected
    /// links return their target for any password, including an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on a password mismatch.
    pub async fn verify_password(
        &self,
        slug: &str,
        password: &str,
    ) -> Result<Option<String>, AppError> {
        let Some(cached) = self.resolve(slug).await? else {
            return Ok(None);
        };

        if !cached.protected {
            return Ok(Some(cached.target_url));
        }

        let matches = cached
            .password_hash
            .as_deref()
            .is_some_and(|hash| verify_password(password, hash));

        if matches {
            Ok(Some(cached.target_url))
        } else {
            Err(AppError::unauthorized(
                "Invalid password",
                json!({ "slug": slug }),
            ))
        }
    }

    /// Expires a link ahead of schedule.
    ///
    /// The conditional update matches only live records with the right
    /// token hash, so a replayed token and a wrong token are
    /// indistinguishable to the caller: both report unauthorized.
    pub async fn expire_early(&self, slug: &str, manage_token: &str) -> Result<(), AppError> {
        let token_hash = hash_manage_token(manage_token);

        let updated = self.repo.expire_by_slug(slug, &token_hash).await?;
        if !updated {
            return Err(AppError::unauthorized(
                "Invalid manage token",
                json!({ "slug": slug }),
            ));
        }

        if let Err(e) = self.cache.invalidate(slug).await {
            warn!(slug, error = %e, "failed to invalidate cache after early expire");
        }

        Ok(())
    }

    /// Validates a slug and reports availability, suggesting the first
    /// free `slug-N` variant when taken.
    pub async fn check_slug(&self, slug: &str) -> Result<SlugAvailability, AppError> {
        validate_slug(slug)?;

        if !self.repo.slug_exists(slug).await? {
            return Ok(SlugAvailability {
                available: true,
                suggestion: None,
            });
        }

        let suggestion = self.suggest_alternative(slug).await?;
        Ok(SlugAvailability {
            available: false,
            suggestion,
        })
    }

    /// Removes every expired record. Called by the periodic cleanup task.
    pub async fn delete_expired(&self) -> Result<u64, AppError> {
        self.repo.delete_expired().await
    }

    /// Storage connectivity probe for health reporting.
    pub async fn ping_store(&self) -> Result<(), AppError> {
        self.repo.ping().await
    }

    async fn resolve_slug(&self, requested: Option<&str>) -> Result<String, AppError> {
        let Some(requested) = requested.filter(|s| !s.is_empty()) else {
            return self.generate_unique_slug().await;
        };

        validate_slug(requested)?;

        if !self.repo.slug_exists(requested).await? {
            return Ok(requested.to_string());
        }

        match self.suggest_alternative(requested).await? {
            Some(candidate) => Ok(candidate),
            None => Err(AppError::conflict(
                "Slug is taken and no alternative could be found",
                json!({ "slug": requested }),
            )),
        }
    }

    async fn generate_unique_slug(&self) -> Result<String, AppError> {
        for _ in 0..MAX_AUTO_SLUG_TRIES {
            let slug = generate_slug();
            if !self.repo.slug_exists(&slug).await? {
                return Ok(slug);
            }
        }

        Err(AppError::internal(
            "Failed to generate a unique slug",
            json!({ "attempts": MAX_AUTO_SLUG_TRIES }),
        ))
    }

    /// First available `slug-N` variant, N starting at 2, that still fits
    /// the slug format. `None` when every candidate up to the bound is
    /// taken or too long.
    async fn suggest_alternative(&self, slug: &str) -> Result<Option<String>, AppError> {
        for n in 2..=MAX_COLLISION_TRIES {
            let candidate = format!("{slug}-{n}");
            // candidates only grow with N
            if candidate.len() > SLUG_MAX_LENGTH {
                break;
            }
            if !self.repo.slug_exists(&candidate).await? {
                return Ok(Some(candidate));
            }
        }

        Ok(None)
    }
}

/// Targets must be absolute http(s) URLs with a host.
fn validate_target_url(raw: &str) -> Result<(), AppError> {
    let parsed = url::Url::parse(raw).map_err(|e| {
        AppError::bad_request(
            "target_url must be a valid URL",
            json!({ "reason": e.to_string() }),
        )
    })?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AppError::bad_request(
            "target_url must be an http or https URL with a host",
            json!({ "target_url": raw }),
        ));
    }

    Ok(())
}
