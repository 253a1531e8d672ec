//! Application layer: services and background tasks.

pub mod cleanup;
pub mod services;
