//! DTOs for short link creation, unlocking, and management.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for custom slug validation.
static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{5,50}$").unwrap());

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// The destination URL (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub target_url: String,

    /// Optional custom slug (5-50 chars, letters, digits, hyphens).
    #[validate(regex(path = "*SLUG_REGEX", message = "Invalid slug format"))]
    pub slug: Option<String>,

    /// Lifetime, one of the whitelisted values ("1h", "24h", "168h",
    /// "720h", "8760h").
    pub ttl: String,

    /// Optional password gating the redirect.
    pub password: Option<String>,
}

/// Response after creating a short link.
///
/// `manage_token` is shown here and never again.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUrlResponse {
    pub slug: String,
    pub short_url: String,
    pub expires_at: DateTime<Utc>,
    pub protected: bool,
    pub manage_token: String,
}

/// Response for a slug availability check.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckSlugResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Request to unlock a password-protected link.
#[derive(Debug, Deserialize, Serialize)]
pub struct UnlockRequest {
    #[serde(default)]
    pub password: String,
}

/// Response revealing the target of an unlocked link.
#[derive(Debug, Serialize, Deserialize)]
pub struct UnlockResponse {
    pub target_url: String,
}

/// Request to expire a link ahead of schedule.
#[derive(Debug, Deserialize, Serialize)]
pub struct ExpireRequest {
    pub manage_token: String,
}

/// Generic confirmation message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
