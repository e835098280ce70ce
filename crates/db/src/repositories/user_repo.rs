//! Repository for the `users` table.

use sqlx::PgPool;
use ideatrack_core::patch;
use ideatrack_core::types::DbId;

use crate::models::user::{CreateUser, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, user_name, bio, roles, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email fails with the `uq_users_email` constraint.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, user_name, bio, roles)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.user_name)
            .bind(&input.bio)
            .bind(&input.roles)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Apply a profile patch.
    ///
    /// `user_name` and `bio` are tri-state: the `CASE WHEN` guards let an
    /// explicit `None` clear the column while an absent field keeps it.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let (user_name_provided, user_name) = patch::split(input.user_name.clone());
        let (bio_provided, bio) = patch::split(input.bio.clone());

        let query = format!(
            "UPDATE users SET
                user_name = CASE WHEN $2 THEN $3 ELSE user_name END,
                bio = CASE WHEN $4 THEN $5 ELSE bio END,
                roles = COALESCE($6, roles)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(user_name_provided)
            .bind(user_name)
            .bind(bio_provided)
            .bind(bio)
            .bind(&input.roles)
            .fetch_optional(pool)
            .await
    }
}
