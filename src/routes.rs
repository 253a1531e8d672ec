//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                          - Redirect to the frontend
//! - `GET  /{slug}`                    - Short link redirect (rate limited)
//! - `POST /api/v1/urls`               - Create a short link
//! - `GET  /api/v1/urls/check/{slug}`  - Slug availability check
//! - `POST /api/v1/urls/{slug}/unlock` - Password unlock (rate limited)
//! - `POST /api/v1/urls/{slug}/expire` - Early expiry via manage token
//! - `GET  /api/v1/health`             - Health check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - One per-IP bucket shared by redirect and unlock
//! - **CORS** - Browser access for the frontend origin
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health::health_handler;
use crate::api::handlers::redirect::{redirect_handler, root_handler};
use crate::api::handlers::urls::{
    check_slug_handler, create_url_handler, expire_url_handler, unlock_url_handler,
};
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use axum::Router;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The redirect and unlock routes share a single rate limit bucket per
/// client IP; the rest of the API is unthrottled.
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    let throttle = rate_limit::shared_layer(config.rate_limit_per_second, config.rate_limit_burst);

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_allowed_origin
                .parse::<HeaderValue>()
                .expect("CORS origin validated at startup"),
        )
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_router = Router::new()
        .route("/urls", post(create_url_handler))
        .route("/urls/check/{slug}", get(check_slug_handler))
        .route(
            "/urls/{slug}/unlock",
            post(unlock_url_handler).route_layer(throttle.clone()),
        )
        .route("/urls/{slug}/expire", post(expire_url_handler))
        .route("/health", get(health_handler))
        .layer(cors);

    let router = Router::new()
        .route("/", get(root_handler))
        .route("/{slug}", get(redirect_handler).route_layer(throttle))
        .nest("/api/v1", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
