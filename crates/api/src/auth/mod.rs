//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`cookie`] -- the `auth_token` session cookie.

pub mod cookie;
pub mod jwt;
pub mod password;
