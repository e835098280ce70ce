//! Repository for the `ideas` table.

use sqlx::PgPool;
use ideatrack_core::patch;
use ideatrack_core::types::DbId;

use crate::models::analytics::StatusCount;
use crate::models::idea::{CreateIdea, Idea, UpdateIdea};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description, status, tags, priority, user_id, created_at, updated_at";

/// Provides owner-scoped CRUD operations for ideas.
pub struct IdeaRepo;

impl IdeaRepo {
    /// Insert a new idea, returning the created row.
    ///
    /// A duplicate title fails with the `uq_ideas_title` constraint.
    pub async fn create(pool: &PgPool, input: &CreateIdea) -> Result<Idea, sqlx::Error> {
        let query = format!(
            "INSERT INTO ideas (title, description, status, tags, priority, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(&input.tags)
            .bind(input.priority)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// List an owner's ideas, most recently created first.
    pub async fn list_for_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Idea>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ideas
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Find an idea by ID, only if it belongs to `owner_id`.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ideas WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Idea>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an idea by title (any owner).
    pub async fn find_by_title(pool: &PgPool, title: &str) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ideas WHERE title = $1");
        sqlx::query_as::<_, Idea>(&query)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Update an owned idea. Only fields present in `input` are applied.
    ///
    /// Returns `None` if no row matches `(id, owner_id)`.
    pub async fn update_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateIdea,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let (description_provided, description) = patch::split(input.description.clone());
        let (priority_provided, priority) = patch::split(input.priority);

        let query = format!(
            "UPDATE ideas SET
                title = COALESCE($3, title),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                status = COALESCE($6, status),
                tags = COALESCE($7, tags),
                priority = CASE WHEN $8 THEN $9 ELSE priority END
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(description_provided)
            .bind(description)
            .bind(input.status)
            .bind(&input.tags)
            .bind(priority_provided)
            .bind(priority)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned idea. Returns `true` if a row was removed.
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ideas WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count ideas per status, in status declaration order.
    ///
    /// With `owner_id = None` the aggregate spans every user's ideas.
    /// Statuses with no ideas are omitted.
    pub async fn count_by_status(
        pool: &PgPool,
        owner_id: Option<DbId>,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count
             FROM ideas
             WHERE $1::uuid IS NULL OR user_id = $1
             GROUP BY status
             ORDER BY status",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }
}
