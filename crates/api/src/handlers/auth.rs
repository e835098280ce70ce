//! Handlers for account registration and the session lifecycle.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::Json;
use ideatrack_core::error::CoreError;
use ideatrack_core::roles;
use ideatrack_core::validation::{
    default_user_name, into_core_error, trim_to_none, MIN_PASSWORD_LENGTH,
};
use ideatrack_db::models::user::{CreateUser, User};
use ideatrack_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    dummy_hash, hash_password, validate_password_strength, verify_password,
};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::AuthResponse;
use crate::state::AppState;

const CREDENTIALS_REQUIRED: &str = "Email and password are required";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub roles: Option<Vec<String>>,
}

/// Request body for `POST /api/login` and `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A validated registration, ready to hash and insert.
#[derive(Debug)]
struct Registration {
    email: String,
    password: String,
    user_name: String,
    bio: Option<String>,
    roles: Vec<String>,
}

impl RegisterRequest {
    fn validate_into(mut self) -> Result<Registration, AppError> {
        self.email = self.email.map(|e| e.trim().to_string());
        let has_email = self.email.as_deref().is_some_and(|e| !e.is_empty());
        let has_password = self.password.as_deref().is_some_and(|p| !p.is_empty());
        if !has_email || !has_password {
            return Err(CoreError::Validation(CREDENTIALS_REQUIRED.into()).into());
        }

        self.validate().map_err(into_core_error)?;
        let password = self.password.unwrap_or_default();
        validate_password_strength(&password, MIN_PASSWORD_LENGTH)
            .map_err(CoreError::Validation)?;

        let roles = roles::normalize_roles(&self.roles.unwrap_or_default())?;
        if roles::has_admin(&roles) {
            return Err(CoreError::Forbidden("Cannot self-assign the admin role".into()).into());
        }

        let email = self.email.unwrap_or_default();
        let user_name = trim_to_none(self.user_name).unwrap_or_else(|| default_user_name(&email));

        Ok(Registration {
            email,
            password,
            user_name,
            bio: trim_to_none(self.bio),
            roles,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Response carrying the session cookie alongside a JSON body.
type SessionResponse = (StatusCode, [(axum::http::HeaderName, String); 1], Json<AuthResponse>);

/// POST /api/auth/register
///
/// Create an account and sign the caller in. Returns 201.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<SessionResponse> {
    let registration = input.validate_into()?;

    let password_hash = hash_password(&registration.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: registration.email,
            password_hash,
            user_name: Some(registration.user_name),
            bio: registration.bio,
            roles: registration.roles,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");
    session_response(&state, user, StatusCode::CREATED, "User registered successfully")
}

/// POST /api/login
///
/// Authenticate with email + password. Unknown email and wrong password share
/// one message and both run an Argon2 verification.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<SessionResponse> {
    let email = input.email.as_deref().map(str::trim).unwrap_or_default();
    let password = input.password.as_deref().unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(CoreError::Validation(CREDENTIALS_REQUIRED.into()).into());
    }

    let Some(user) = UserRepo::find_by_email(&state.pool, email).await? else {
        // Spend the same Argon2 work as a real check.
        if let Some(hash) = dummy_hash() {
            let _ = verify_password(password, hash);
        }
        tracing::info!("Login rejected: unknown email");
        return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
    };

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
    }

    tracing::info!(user_id = %user.id, "User logged in");
    session_response(&state, user, StatusCode::OK, "Login successful")
}

/// POST /api/auth/logout
///
/// Clear the session cookie. Tokens are stateless, so one already copied
/// elsewhere stays valid until it expires.
pub async fn logout(
    State(state): State<AppState>,
) -> (StatusCode, [(axum::http::HeaderName, String); 1]) {
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_session_cookie(state.config.cookie_secure))],
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign a token for `user`, set it as the session cookie and echo it in the body.
fn session_response(
    state: &AppState,
    user: User,
    status: StatusCode,
    message: &'static str,
) -> AppResult<SessionResponse> {
    let jwt = &state.config.jwt;
    let issued = generate_access_token(user.id, &user.roles, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let cookie = session_cookie(&issued.token, jwt.expiry_secs(), state.config.cookie_secure);

    Ok((
        status,
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            message,
            user: user.into(),
            token: issued.token,
            expires: issued.expires_at,
        }),
    ))
}
