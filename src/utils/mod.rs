//! Shared helpers: slug/token generation and password hashing.

pub mod password;
pub mod slug;
