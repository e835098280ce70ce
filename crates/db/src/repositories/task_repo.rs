//! Repository for the `tasks` table.
//!
//! Every query is scoped to a parent project. Callers confirm the project
//! belongs to the session user (see [`super::ProjectRepo::is_owned_by`])
//! before reaching these methods.

use sqlx::PgPool;
use ideatrack_core::patch;
use ideatrack_core::types::DbId;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, title, description, status, due_date, assigned_to_id, created_at, updated_at";

/// Provides project-scoped CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// A title already used in the same project fails with the
    /// `uq_tasks_project_title` constraint.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, title, description, status, due_date, assigned_to_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.due_date)
            .bind(input.assigned_to_id)
            .fetch_one(pool)
            .await
    }

    /// List a project's tasks, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Find a task by ID within a project.
    pub async fn find_in_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a task by title within a project.
    pub async fn find_by_title(
        pool: &PgPool,
        project_id: DbId,
        title: &str,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE project_id = $1 AND title = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Update a task within a project. Only fields present in `input` are
    /// applied.
    ///
    /// Returns `None` if no row matches `(id, project_id)`.
    pub async fn update_in_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let (description_provided, description) = patch::split(input.description.clone());
        let (due_provided, due_date) = patch::split(input.due_date);
        let (assignee_provided, assigned_to_id) = patch::split(input.assigned_to_id);

        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($3, title),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                status = COALESCE($6, status),
                due_date = CASE WHEN $7 THEN $8 ELSE due_date END,
                assigned_to_id = CASE WHEN $9 THEN $10 ELSE assigned_to_id END
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.title)
            .bind(description_provided)
            .bind(description)
            .bind(input.status)
            .bind(due_provided)
            .bind(due_date)
            .bind(assignee_provided)
            .bind(assigned_to_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task within a project. Returns `true` if a row was removed.
    pub async fn delete_in_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
