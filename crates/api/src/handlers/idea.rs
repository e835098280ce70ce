//! Handlers for the `/ideas` resource.
//!
//! Every operation is scoped to the session user; someone else's idea is
//! reported as not found.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ideatrack_core::error::CoreError;
use ideatrack_core::patch::deserialize_some;
use ideatrack_core::types::DbId;
use ideatrack_core::validation::{non_blank_if_present, require_non_blank, trim_to_none};
use ideatrack_db::models::idea::{CreateIdea, Idea, UpdateIdea};
use ideatrack_db::models::project::Project;
use ideatrack_db::models::status::{IdeaPriority, IdeaStatus};
use ideatrack_db::repositories::{IdeaRepo, ProjectRepo};
use serde::Deserialize;

use super::empty_update;
use super::project::CreateProjectRequest;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/ideas`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdeaRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<IdeaStatus>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<IdeaPriority>,
}

/// Request body for `PUT`/`PATCH /api/ideas/{id}`. Both verbs apply only the
/// fields present.
///
/// `description` and `priority` accept `null` to clear; `tags: null` resets
/// to an empty list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIdeaRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    pub status: Option<IdeaStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub tags: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub priority: Option<Option<IdeaPriority>>,
}

/// Trim tag labels and drop blank ones, keeping order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

impl CreateIdeaRequest {
    fn into_create(self, user_id: DbId) -> Result<CreateIdea, CoreError> {
        Ok(CreateIdea {
            user_id,
            title: require_non_blank(self.title, "Title is required")?,
            description: trim_to_none(self.description),
            status: self.status.unwrap_or_default(),
            tags: normalize_tags(self.tags.unwrap_or_default()),
            priority: self.priority,
        })
    }
}

impl UpdateIdeaRequest {
    fn into_update(self) -> Result<UpdateIdea, AppError> {
        let update = UpdateIdea {
            title: non_blank_if_present(self.title, "Title must not be empty")?,
            description: self.description.map(trim_to_none),
            status: self.status,
            tags: self.tags.map(|t| normalize_tags(t.unwrap_or_default())),
            priority: self.priority,
        };
        if update.is_empty() {
            return Err(empty_update());
        }
        Ok(update)
    }
}

fn idea_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Idea", id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/ideas
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Idea>>> {
    let ideas = IdeaRepo::list_for_owner(&state.pool, user.user_id).await?;
    Ok(Json(ideas))
}

/// POST /api/ideas
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateIdeaRequest>,
) -> AppResult<(StatusCode, Json<Idea>)> {
    let input = input.into_create(user.user_id)?;
    let idea = IdeaRepo::create(&state.pool, &input).await?;

    tracing::info!(user_id = %user.user_id, idea_id = %idea.id, "Idea created");
    Ok((StatusCode::CREATED, Json(idea)))
}

/// GET /api/ideas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Idea>> {
    let idea = IdeaRepo::find_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| idea_not_found(id))?;
    Ok(Json(idea))
}

/// PUT/PATCH /api/ideas/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateIdeaRequest>,
) -> AppResult<Json<Idea>> {
    let input = input.into_update()?;
    let idea = IdeaRepo::update_for_owner(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or_else(|| idea_not_found(id))?;

    tracing::info!(user_id = %user.user_id, idea_id = %id, "Idea updated");
    Ok(Json(idea))
}

/// DELETE /api/ideas/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !IdeaRepo::delete_for_owner(&state.pool, id, user.user_id).await? {
        return Err(idea_not_found(id));
    }

    tracing::info!(user_id = %user.user_id, idea_id = %id, "Idea deleted");
    Ok(Json(MessageResponse {
        message: "Idea deleted successfully",
    }))
}

/// POST /api/ideas/{id}/convert
///
/// Create a project from an owned idea and mark the idea
/// `ConvertedToProject`, atomically. The body is optional. `name` and
/// `description` default to the idea's title and description; any idea status
/// may be converted.
pub async fn convert(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    body: Option<AppJson<CreateProjectRequest>>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let mut input = body.map(|AppJson(input)| input).unwrap_or_default();
    let idea = IdeaRepo::find_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| idea_not_found(id))?;

    if trim_to_none(input.name.clone()).is_none() {
        input.name = Some(idea.title);
    }
    if input.description.is_none() {
        input.description = idea.description;
    }
    input.idea_id = None;
    let project = input.into_create(user.user_id)?;

    let project = ProjectRepo::create_from_idea(&state.pool, id, &project)
        .await?
        .ok_or_else(|| idea_not_found(id))?;

    tracing::info!(
        user_id = %user.user_id,
        idea_id = %id,
        project_id = %project.id,
        "Idea converted to project"
    );
    Ok((StatusCode::CREATED, Json(project)))
}
