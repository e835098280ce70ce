//! Handlers for `/analytics`.

use axum::extract::State;
use axum::Json;
use ideatrack_db::models::analytics::StatusCount;
use ideatrack_db::repositories::IdeaRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/analytics/ideas-by-status
///
/// Admins see counts across every user's ideas; everyone else sees counts
/// over their own. Statuses with no ideas are omitted.
pub async fn ideas_by_status(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<StatusCount>>> {
    let scope = if user.is_admin() {
        None
    } else {
        Some(user.user_id)
    };
    let counts = IdeaRepo::count_by_status(&state.pool, scope).await?;
    Ok(Json(counts))
}
