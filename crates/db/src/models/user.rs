//! User entity model and inputs.

use serde::Serialize;
use sqlx::FromRow;
use ideatrack_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub user_name: Option<String>,
    pub bio: Option<String>,
    pub roles: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub user_name: Option<String>,
    pub bio: Option<String>,
    pub roles: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            user_name: user.user_name,
            bio: user.bio,
            roles: user.roles,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Validated input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub user_name: Option<String>,
    pub bio: Option<String>,
    pub roles: Vec<String>,
}

/// Validated profile patch. `None` leaves a column unchanged; for the
/// nullable columns `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub user_name: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub roles: Option<Vec<String>>,
}

impl UpdateProfile {
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none() && self.bio.is_none() && self.roles.is_none()
    }
}
