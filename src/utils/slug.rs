//! Slug validation and random slug/token generation.
//!
//! Random material is drawn from the operating system RNG and mapped onto
//! a 62-character alphanumeric alphabet with rejection sampling, so every
//! character is equally likely.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Bytes at or above this value are discarded during sampling: 248 is the
/// largest multiple of 62 that fits in a byte, so `byte % 62` below it
/// carries no modulo bias.
const UNBIASED_CEILING: u8 = 248;

/// Length of generated slugs.
pub const AUTO_SLUG_LENGTH: usize = 8;

/// Maximum length of a user-provided slug.
pub const SLUG_MAX_LENGTH: usize = 50;

/// Length of generated management tokens.
pub const MANAGE_TOKEN_LENGTH: usize = 32;

/// Compiled pattern for user-provided slugs.
static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{5,50}$").unwrap());

/// Validates a user-provided slug: 5-50 characters, letters, digits, or
/// hyphens.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the slug does not match.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Slug must be 5-50 characters: letters, numbers, or hyphens",
            json!({ "slug": slug }),
        ))
    }
}

/// Generates a random slug of [`AUTO_SLUG_LENGTH`] base62 characters.
pub fn generate_slug() -> String {
    random_base62(AUTO_SLUG_LENGTH)
}

/// Generates a management token together with the sha256 hex digest that
/// is persisted in its place. The plaintext is shown to the caller exactly
/// once.
pub fn generate_manage_token() -> (String, String) {
    let token = random_base62(MANAGE_TOKEN_LENGTH);
    let digest = hash_manage_token(&token);
    (token, digest)
}

/// Sha256 hex digest of a management token.
pub fn hash_manage_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Uniform random base62 string of the given length.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
fn random_base62(length: usize) -> String {
    let mut out = String::with_capacity(length);
    let mut buf = [0u8; 64];

    while out.len() < length {
        getrandom::fill(&mut buf).expect("Failed to generate random bytes");

        for &byte in &buf {
            if byte < UNBIASED_CEILING {
                out.push(BASE62_ALPHABET[(byte % 62) as usize] as char);
                if out.len() == length {
                    break;
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_validate_accepts_valid_slugs() {
        for slug in ["abcde", "ABC-12", "promo-2025", &"a".repeat(50)] {
            assert!(validate_slug(slug).is_ok(), "{slug:?} should be valid");
        }
    }

    #[test]
    fn test_validate_length_bounds() {
        assert!(validate_slug("abcd").is_err());
        assert!(validate_slug("abcde").is_ok());
        assert!(validate_slug(&"a".repeat(50)).is_ok());
        assert!(validate_slug(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_characters() {
        for slug in ["with space", "under_score", "unicode-é", "semi;colon", "slash/x"] {
            assert!(validate_slug(slug).is_err(), "{slug:?} should be rejected");
        }
    }

    #[test]
    fn test_generated_slug_shape() {
        let slug = generate_slug();
        assert_eq!(slug.len(), AUTO_SLUG_LENGTH);
        assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(validate_slug(&slug).is_ok());
    }

    #[test]
    fn test_generated_slugs_are_unique() {
        let mut slugs = HashSet::new();
        for _ in 0..1000 {
            slugs.insert(generate_slug());
        }
        assert_eq!(slugs.len(), 1000);
    }

    #[test]
    fn test_manage_token_distinct_from_hash() {
        let (token, digest) = generate_manage_token();
        assert_eq!(token.len(), MANAGE_TOKEN_LENGTH);
        assert_ne!(token, digest);
        assert_eq!(digest, hash_manage_token(&token));
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let digest = hash_manage_token("some-token");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        // deterministic
        assert_eq!(digest, hash_manage_token("some-token"));
    }
}
