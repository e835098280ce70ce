//! Repository for the `projects` table.

use sqlx::PgPool;
use ideatrack_core::patch;
use ideatrack_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::status::IdeaStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, status, owner_id, assigned_to_user_ids, \
                        start_date, end_date, budget, idea_id, created_at, updated_at";

/// Provides owner-scoped CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// A duplicate name fails with the `uq_projects_name` constraint.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (name, description, status, owner_id, assigned_to_user_ids,
                 start_date, end_date, budget, idea_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.owner_id)
            .bind(&input.assigned_to_user_ids)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.budget)
            .bind(input.idea_id)
            .fetch_one(pool)
            .await
    }

    /// Convert an owned idea into a project in a single transaction.
    ///
    /// Marks the idea `ConvertedToProject`, then inserts `input` with
    /// `idea_id` pointing back at it. Returns `None` (and writes nothing) if
    /// the idea does not exist or belongs to someone else.
    pub async fn create_from_idea(
        pool: &PgPool,
        idea_id: DbId,
        input: &CreateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let converted = sqlx::query("UPDATE ideas SET status = $3 WHERE id = $1 AND user_id = $2")
            .bind(idea_id)
            .bind(input.owner_id)
            .bind(IdeaStatus::ConvertedToProject)
            .execute(&mut *tx)
            .await?;
        if converted.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO projects
                (name, description, status, owner_id, assigned_to_user_ids,
                 start_date, end_date, budget, idea_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.owner_id)
            .bind(&input.assigned_to_user_ids)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.budget)
            .bind(idea_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(project))
    }

    /// List one page of an owner's projects, newest first.
    ///
    /// Callers pass `limit = page_size + 1` to detect whether a further page
    /// exists without a separate count query.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE owner_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a project by ID, only if it belongs to `owner_id`.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by its (globally unique) name, any owner.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE name = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Whether `owner_id` owns the project `id`.
    pub async fn is_owned_by(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1 AND owner_id = $2)",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_one(pool)
        .await
    }

    /// Update an owned project. Only fields present in `input` are applied.
    ///
    /// The date-order check constraint sees the merged row, so moving only
    /// `end_date` before the stored `start_date` is rejected by the database.
    /// Returns `None` if no row matches `(id, owner_id)`.
    pub async fn update_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let (description_provided, description) = patch::split(input.description.clone());
        let (start_provided, start_date) = patch::split(input.start_date);
        let (end_provided, end_date) = patch::split(input.end_date);
        let (budget_provided, budget) = patch::split(input.budget);
        let (idea_provided, idea_id) = patch::split(input.idea_id);

        let query = format!(
            "UPDATE projects SET
                name = COALESCE($3, name),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                status = COALESCE($6, status),
                assigned_to_user_ids = COALESCE($7, assigned_to_user_ids),
                start_date = CASE WHEN $8 THEN $9 ELSE start_date END,
                end_date = CASE WHEN $10 THEN $11 ELSE end_date END,
                budget = CASE WHEN $12 THEN $13 ELSE budget END,
                idea_id = CASE WHEN $14 THEN $15 ELSE idea_id END
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(description_provided)
            .bind(description)
            .bind(input.status)
            .bind(&input.assigned_to_user_ids)
            .bind(start_provided)
            .bind(start_date)
            .bind(end_provided)
            .bind(end_date)
            .bind(budget_provided)
            .bind(budget)
            .bind(idea_provided)
            .bind(idea_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned project (its tasks cascade). Returns `true` if a row
    /// was removed.
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
