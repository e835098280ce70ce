//! Handlers for tasks nested under `/projects/{project_id}/tasks`.
//!
//! The parent project must belong to the session user; a project owned by
//! someone else behaves as if it did not exist.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ideatrack_core::dates::parse_optional_date;
use ideatrack_core::error::CoreError;
use ideatrack_core::patch::deserialize_some;
use ideatrack_core::types::DbId;
use ideatrack_core::validation::{non_blank_if_present, require_non_blank, trim_to_none};
use ideatrack_db::models::status::TaskStatus;
use ideatrack_db::models::task::{CreateTask, Task, UpdateTask};
use ideatrack_db::repositories::{ProjectRepo, TaskRepo};
use serde::Deserialize;

use super::empty_update;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/projects/{project_id}/tasks`.
///
/// `status` accepts canonical names or display labels (`"To Do"`,
/// `"In Progress"`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
    pub assigned_to_id: Option<DbId>,
}

/// Request body for `PUT`/`PATCH /api/projects/{project_id}/tasks/{task_id}`.
///
/// `description`, `dueDate` and `assignedToId` accept `null` to clear.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub assigned_to_id: Option<Option<DbId>>,
}

impl CreateTaskRequest {
    fn into_create(self, project_id: DbId) -> Result<CreateTask, CoreError> {
        let status = match self.status.as_deref() {
            Some(raw) => TaskStatus::from_input(raw)?,
            None => TaskStatus::default(),
        };

        Ok(CreateTask {
            project_id,
            title: require_non_blank(self.title, "Title is required")?,
            description: trim_to_none(self.description),
            status,
            due_date: parse_optional_date("dueDate", self.due_date.as_deref())?,
            assigned_to_id: self.assigned_to_id,
        })
    }
}

impl UpdateTaskRequest {
    fn into_update(self) -> Result<UpdateTask, AppError> {
        let due_date = self
            .due_date
            .map(|inner| parse_optional_date("dueDate", inner.as_deref()))
            .transpose()?;

        let update = UpdateTask {
            title: non_blank_if_present(self.title, "Title must not be empty")?,
            description: self.description.map(trim_to_none),
            status: self.status.as_deref().map(TaskStatus::from_input).transpose()?,
            due_date,
            assigned_to_id: self.assigned_to_id,
        };
        if update.is_empty() {
            return Err(empty_update());
        }
        Ok(update)
    }
}

fn task_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

/// Resolve the parent project for the caller, or 404.
async fn ensure_project_owned(state: &AppState, project_id: DbId, user: &AuthUser) -> AppResult<()> {
    if ProjectRepo::is_owned_by(&state.pool, project_id, user.user_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/projects/{project_id}/tasks
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<Vec<Task>>> {
    ensure_project_owned(&state, project_id, &user).await?;
    let tasks = TaskRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(tasks))
}

/// POST /api/projects/{project_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(project_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<Task>)> {
    ensure_project_owned(&state, project_id, &user).await?;
    let input = input.into_create(project_id)?;
    let task = TaskRepo::create(&state.pool, &input).await?;

    tracing::info!(project_id = %project_id, task_id = %task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/projects/{project_id}/tasks/{task_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath((project_id, task_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<Task>> {
    ensure_project_owned(&state, project_id, &user).await?;
    let task = TaskRepo::find_in_project(&state.pool, project_id, task_id)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;
    Ok(Json(task))
}

/// PUT/PATCH /api/projects/{project_id}/tasks/{task_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath((project_id, task_id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateTaskRequest>,
) -> AppResult<Json<Task>> {
    ensure_project_owned(&state, project_id, &user).await?;
    let input = input.into_update()?;
    let task = TaskRepo::update_in_project(&state.pool, project_id, task_id, &input)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;

    tracing::info!(project_id = %project_id, task_id = %task_id, "Task updated");
    Ok(Json(task))
}

/// DELETE /api/projects/{project_id}/tasks/{task_id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath((project_id, task_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    ensure_project_owned(&state, project_id, &user).await?;
    if !TaskRepo::delete_in_project(&state.pool, project_id, task_id).await? {
        return Err(task_not_found(task_id));
    }

    tracing::info!(project_id = %project_id, task_id = %task_id, "Task deleted");
    Ok(Json(MessageResponse {
        message: "Task deleted successfully",
    }))
}
