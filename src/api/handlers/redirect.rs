//! Handlers for the redirect hot path.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its target.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Response Codes
///
/// - **301**: unprotected link, `Location` is the target
/// - **302**: protected link, `Location` is the frontend gate page
/// - **302**: unknown or expired slug, `Location` is the frontend 404 page
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let Some(cached) = state.urls.resolve(&slug).await? else {
        return located(
            StatusCode::FOUND,
            &format!("{}/404", state.frontend_url),
        );
    };

    if cached.protected {
        return located(
            StatusCode::FOUND,
            &format!("{}/gate/{}", state.frontend_url, slug),
        );
    }

    located(StatusCode::MOVED_PERMANENTLY, &cached.target_url)
}

/// Sends visitors of the bare domain to the frontend.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    located(StatusCode::FOUND, &state.frontend_url)
}

/// Builds a redirect with an explicit status code.
///
/// `axum::response::Redirect` only offers 303/307/308, so the 301/302
/// pair is assembled by hand.
fn located(status: StatusCode, location: &str) -> Result<Response, AppError> {
    let value = HeaderValue::from_str(location).map_err(|_| {
        AppError::internal(
            "Redirect target is not a valid header value",
            json!({ "location": location }),
        )
    })?;

    Ok((status, [(header::LOCATION, value)]).into_response())
}
