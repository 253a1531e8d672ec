//! Short link entity and its cache projection.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A short link record as stored in Postgres.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShortUrl {
    pub id: i64,
    pub slug: String,
    pub target_url: String,
    pub password_hash: Option<String>,
    /// Sha256 hex digest of the one-time management token. The plaintext
    /// token is never persisted.
    pub manage_token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Time left until expiration. Negative once the record has lapsed.
    pub fn remaining(&self) -> Duration {
        self.expires_at - Utc::now()
    }

    /// A record is live only while the current time is before `expires_at`.
    pub fn is_live(&self) -> bool {
        Utc::now() < self.expires_at
    }

    /// Projects the record into the payload held by the cache.
    pub fn to_cached(&self) -> CachedUrl {
        CachedUrl {
            target_url: self.target_url.clone(),
            protected: self.password_hash.is_some(),
            password_hash: self.password_hash.clone(),
        }
    }
}

/// Input data for inserting a new short link.
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub slug: String,
    pub target_url: String,
    pub password_hash: Option<String>,
    pub manage_token_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// The derived projection held by the cache: everything needed to serve a
/// redirect or a password gate without touching the durable store.
///
/// The cache is not authoritative; a missing entry signals nothing about
/// the record's existence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedUrl {
    pub target_url: String,
    pub protected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}
