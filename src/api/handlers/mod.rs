//! HTTP request handlers.

pub mod health;
pub mod redirect;
pub mod urls;
