//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ideatrack_core::dates::parse_optional_date;
use ideatrack_core::error::CoreError;
use ideatrack_core::pagination::{Page, PageRequest};
use ideatrack_core::patch::deserialize_some;
use ideatrack_core::types::{DbId, Timestamp};
use ideatrack_core::validation::{
    into_core_error, non_blank_if_present, require_non_blank, trim_to_none,
};
use ideatrack_db::models::project::{CreateProject, Project, UpdateProject};
use ideatrack_db::models::status::ProjectStatus;
use ideatrack_db::repositories::{IdeaRepo, ProjectRepo};
use serde::Deserialize;
use validator::Validate;

use super::empty_update;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

const NEGATIVE_BUDGET: &str = "Budget must not be negative";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/projects` (and `POST /api/ideas/{id}/convert`).
///
/// Dates are RFC 3339 timestamps or `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub assigned_to_user_ids: Option<Vec<DbId>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[validate(range(min = 0.0, message = "Budget must not be negative"))]
    pub budget: Option<f64>,
    pub idea_id: Option<DbId>,
}

/// Request body for `PUT`/`PATCH /api/projects/{id}`.
///
/// Nullable fields accept `null` to clear; `assignedToUserIds: null` resets
/// to an empty list. The owner is not patchable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub assigned_to_user_ids: Option<Option<Vec<DbId>>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub end_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub budget: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub idea_id: Option<Option<DbId>>,
}

/// Query parameters for `GET /api/projects`.
///
/// Kept as raw strings so junk values fall back to defaults instead of
/// failing the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

fn check_date_order(start: Option<Timestamp>, end: Option<Timestamp>) -> Result<(), CoreError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(CoreError::Validation(
            "End date must not be earlier than start date".into(),
        )),
        _ => Ok(()),
    }
}

/// Parse a tri-state date field, keeping the absent/null/value distinction.
fn parse_date_patch(
    field: &str,
    raw: Option<Option<String>>,
) -> Result<Option<Option<Timestamp>>, CoreError> {
    raw.map(|inner| parse_optional_date(field, inner.as_deref()))
        .transpose()
}

impl CreateProjectRequest {
    pub(crate) fn into_create(self, owner_id: DbId) -> Result<CreateProject, AppError> {
        self.validate().map_err(into_core_error)?;

        let start_date = parse_optional_date("startDate", self.start_date.as_deref())?;
        let end_date = parse_optional_date("endDate", self.end_date.as_deref())?;
        check_date_order(start_date, end_date)?;

        Ok(CreateProject {
            owner_id,
            name: require_non_blank(self.name, "Name is required")?,
            description: trim_to_none(self.description),
            status: self.status.unwrap_or_default(),
            assigned_to_user_ids: self.assigned_to_user_ids.unwrap_or_default(),
            start_date,
            end_date,
            budget: self.budget,
            idea_id: self.idea_id,
        })
    }
}

impl UpdateProjectRequest {
    fn into_update(self) -> Result<UpdateProject, AppError> {
        if matches!(self.budget, Some(Some(b)) if b < 0.0) {
            return Err(CoreError::Validation(NEGATIVE_BUDGET.into()).into());
        }

        let start_date = parse_date_patch("startDate", self.start_date)?;
        let end_date = parse_date_patch("endDate", self.end_date)?;
        // Only a pair supplied together is checked here; a single date is
        // checked against the stored one by the table constraint.
        check_date_order(start_date.flatten(), end_date.flatten())?;

        let update = UpdateProject {
            name: non_blank_if_present(self.name, "Name must not be empty")?,
            description: self.description.map(trim_to_none),
            status: self.status,
            assigned_to_user_ids: self.assigned_to_user_ids.map(Option::unwrap_or_default),
            start_date,
            end_date,
            budget: self.budget,
            idea_id: self.idea_id,
        };
        if update.is_empty() {
            return Err(empty_update());
        }
        Ok(update)
    }
}

fn project_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// A linked idea must belong to the caller.
async fn ensure_idea_owned(state: &AppState, idea_id: DbId, owner_id: DbId) -> AppResult<()> {
    IdeaRepo::find_for_owner(&state.pool, idea_id, owner_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Idea",
            id: idea_id,
        }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/projects?page=&pageSize=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<ListProjectsParams>,
) -> AppResult<Json<Page<Project>>> {
    let page = PageRequest::from_raw(params.page.as_deref(), params.page_size.as_deref());
    let rows = ProjectRepo::list_for_owner(
        &state.pool,
        user.user_id,
        page.fetch_limit(),
        page.offset(),
    )
    .await?;
    Ok(Json(page.into_page(rows)))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let input = input.into_create(user.user_id)?;
    if let Some(idea_id) = input.idea_id {
        ensure_idea_owned(&state, idea_id, user.user_id).await?;
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;

    tracing::info!(user_id = %user.user_id, project_id = %project.id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    Ok(Json(project))
}

/// PUT/PATCH /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProjectRequest>,
) -> AppResult<Json<Project>> {
    let input = input.into_update()?;
    if let Some(Some(idea_id)) = input.idea_id {
        ensure_idea_owned(&state, idea_id, user.user_id).await?;
    }

    let project = ProjectRepo::update_for_owner(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or_else(|| project_not_found(id))?;

    tracing::info!(user_id = %user.user_id, project_id = %id, "Project updated");
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// The project's tasks are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ProjectRepo::delete_for_owner(&state.pool, id, user.user_id).await? {
        return Err(project_not_found(id));
    }

    tracing::info!(user_id = %user.user_id, project_id = %id, "Project deleted");
    Ok(Json(MessageResponse {
        message: "Project deleted successfully",
    }))
}
