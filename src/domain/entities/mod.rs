//! Core business entities.

mod short_url;
mod ttl;

pub use short_url::{CachedUrl, NewShortUrl, ShortUrl};
pub use ttl::Ttl;
