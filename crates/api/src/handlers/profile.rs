//! Handlers for the signed-in user's own profile.

use axum::extract::State;
use axum::Json;
use ideatrack_core::error::CoreError;
use ideatrack_core::patch::deserialize_some;
use ideatrack_core::roles::normalize_roles;
use ideatrack_core::types::DbId;
use ideatrack_core::validation::trim_to_none;
use ideatrack_db::models::user::{UpdateProfile, UserResponse};
use ideatrack_db::repositories::UserRepo;
use serde::Deserialize;

use super::empty_update;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PATCH /api/auth/profile`.
///
/// `userName` and `bio` accept `null` to clear.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub user_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub bio: Option<Option<String>>,
    pub roles: Option<Vec<String>>,
}

impl UpdateProfileRequest {
    /// Validate against the caller's rights and produce the repository patch.
    fn into_patch(self, user: &AuthUser) -> Result<UpdateProfile, AppError> {
        let roles = match self.roles {
            Some(requested) => {
                user.require_admin("change roles")?;
                Some(normalize_roles(&requested)?)
            }
            None => None,
        };

        let patch = UpdateProfile {
            user_name: self.user_name.map(trim_to_none),
            bio: self.bio.map(trim_to_none),
            roles,
        };
        if patch.is_empty() {
            return Err(empty_update());
        }
        Ok(patch)
    }
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// GET /api/auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| user_not_found(user.user_id))?;
    Ok(Json(row.into()))
}

/// PATCH /api/auth/profile
///
/// Role changes take effect in tokens issued at the next login.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let patch = input.into_patch(&user)?;

    let row = UserRepo::update_profile(&state.pool, user.user_id, &patch)
        .await?
        .ok_or_else(|| user_not_found(user.user_id))?;

    tracing::info!(user_id = %row.id, "Profile updated");
    Ok(Json(row.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    fn caller(roles: &[&str]) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn empty_body_is_rejected() {
        assert_matches!(
            UpdateProfileRequest::default().into_patch(&caller(&["user"])),
            Err(AppError::Core(CoreError::Validation(msg))) if msg == "No fields provided for update"
        );
    }

    #[test]
    fn null_bio_clears() {
        let req: UpdateProfileRequest = serde_json::from_str(r#"{"bio": null}"#).unwrap();
        let patch = req.into_patch(&caller(&["user"])).unwrap();
        assert_eq!(patch.bio, Some(None));
        assert_eq!(patch.user_name, None);
    }

    #[test]
    fn role_change_needs_admin() {
        let req: UpdateProfileRequest = serde_json::from_str(r#"{"roles": ["user"]}"#).unwrap();
        assert_matches!(
            req.into_patch(&caller(&["user"])),
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }

    #[test]
    fn admin_may_change_roles() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"roles": ["admin", "user"]}"#).unwrap();
        let patch = req.into_patch(&caller(&["admin"])).unwrap();
        assert_eq!(
            patch.roles,
            Some(vec!["admin".to_string(), "user".to_string()])
        );
    }
}
