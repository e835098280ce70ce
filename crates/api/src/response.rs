//! Shared response types for API handlers.

use ideatrack_db::models::user::UserResponse;
use serde::Serialize;

/// `{ "message": "..." }` acknowledgement, e.g. after a delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Body returned by register and login.
///
/// `expires` is the RFC 3339 instant the token stops being valid.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: UserResponse,
    pub token: String,
    pub expires: ideatrack_core::types::Timestamp,
}
