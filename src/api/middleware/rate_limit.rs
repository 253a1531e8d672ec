//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Creates a rate limiter keyed on the client's socket peer address.
///
/// The returned layer is cheap to clone and every clone shares the same
/// bucket state, so attaching clones to several routes enforces one
/// combined limit across them. Requests over the limit receive
/// `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let throttle = rate_limit::shared_layer(1, 60);
/// let app = Router::new()
///     .route("/{slug}", get(redirect_handler).route_layer(throttle.clone()))
///     .route("/unlock", post(unlock_handler).route_layer(throttle));
/// ```
pub fn shared_layer(
    per_second: u64,
    burst: u32,
) -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
