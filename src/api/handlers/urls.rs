//! Handlers for short link creation, checking, unlocking, and expiry.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::urls::{
    CheckSlugResponse, CreateUrlRequest, CreateUrlResponse, ExpireRequest, MessageResponse,
    UnlockRequest, UnlockResponse,
};
use crate::application::services::CreateUrl;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/v1/urls`
///
/// # Request Body
///
/// ```json
/// {
///   "target_url": "https://example.com/some/long/path",
///   "slug": "my-link",        // optional
///   "ttl": "24h",
///   "password": "hunter2"     // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the slug, the full short URL, the expiry timestamp,
/// and the one-time manage token.
///
/// # Errors
///
/// - **400**: invalid target, slug, or TTL
/// - **409**: slug taken and every suffix variant taken too
pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<CreateUrlResponse>), AppError> {
    payload.validate()?;

    let created = state
        .urls
        .create(CreateUrl {
            target_url: payload.target_url,
            slug: payload.slug,
            ttl: payload.ttl,
            password: payload.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            slug: created.slug,
            short_url: created.short_url,
            expires_at: created.expires_at,
            protected: created.protected,
            manage_token: created.manage_token,
        }),
    ))
}

/// Reports whether a slug is free, suggesting an alternative when taken.
///
/// # Endpoint
///
/// `GET /api/v1/urls/check/{slug}`
pub async fn check_slug_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CheckSlugResponse>, AppError> {
    let availability = state.urls.check_slug(&slug).await?;

    Ok(Json(CheckSlugResponse {
        available: availability.available,
        suggestion: availability.suggestion,
    }))
}

/// Unlocks a password-protected link, returning its target.
///
/// # Endpoint
///
/// `POST /api/v1/urls/{slug}/unlock`
///
/// Unprotected links answer with their target for any password.
///
/// # Errors
///
/// - **401**: wrong password
/// - **404**: slug missing or expired
pub async fn unlock_url_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<UnlockRequest>,
) -> Result<Json<UnlockResponse>, AppError> {
    match state.urls.verify_password(&slug, &payload.password).await? {
        Some(target_url) => Ok(Json(UnlockResponse { target_url })),
        None => Err(AppError::not_found(
            "URL not found or expired",
            serde_json::json!({ "slug": slug }),
        )),
    }
}

/// Expires a link ahead of schedule using its manage token.
///
/// # Endpoint
///
/// `POST /api/v1/urls/{slug}/expire`
///
/// # Errors
///
/// - **401**: token does not match or the link is already expired
pub async fn expire_url_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<ExpireRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state.urls.expire_early(&slug, &payload.manage_token).await?;

    Ok(Json(MessageResponse {
        message: "URL has been expired".to_string(),
    }))
}
