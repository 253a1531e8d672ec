//! Request and response DTOs.

pub mod health;
pub mod urls;
