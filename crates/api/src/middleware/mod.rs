//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- the session identity, from a Bearer token or the
//!   `auth_token` cookie.

pub mod auth;
