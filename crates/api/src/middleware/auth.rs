//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use ideatrack_core::error::CoreError;
use ideatrack_core::roles;
use ideatrack_core::types::DbId;

use crate::auth::cookie::{clear_session_cookie, read_cookie, AUTH_COOKIE};
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the request credential.
///
/// The token is read from `Authorization: Bearer <token>` first, then from the
/// `auth_token` cookie. Use this as an extractor parameter in any handler that
/// requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`).
    pub user_id: DbId,
    /// Roles copied into the token at login.
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        roles::has_admin(&self.roles)
    }

    /// Reject with 403 unless the caller holds the `admin` role.
    pub fn require_admin(&self, action: &str) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(format!(
                "Admin role required to {action}"
            ))))
        }
    }
}

/// Why a request could not be authenticated.
#[derive(Debug)]
pub enum AuthRejection {
    /// No credential was presented.
    Missing,
    /// A credential was presented but failed verification. The response
    /// also clears the session cookie.
    Invalid { secure_cookie: bool },
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Missing => AppError::Core(CoreError::Unauthorized(
                "Authentication required".into(),
            ))
            .into_response(),
            AuthRejection::Invalid { secure_cookie } => {
                let mut response = AppError::Core(CoreError::Unauthorized(
                    "Invalid or expired token".into(),
                ))
                .into_response();
                if let Ok(value) = HeaderValue::from_str(&clear_session_cookie(secure_cookie)) {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                response
            }
        }
    }
}

/// Pull the raw token from the request, header first.
fn credential(parts: &Parts) -> Option<&str> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    bearer.or_else(|| read_cookie(&parts.headers, AUTH_COOKIE))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = credential(parts).ok_or(AuthRejection::Missing)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AuthRejection::Invalid {
                secure_cookie: state.config.cookie_secure,
            }
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            roles: claims.roles,
        })
    }
}
