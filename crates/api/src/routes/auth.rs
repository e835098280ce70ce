use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, profile};
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /register       -> register
/// POST   /login          -> login
/// POST   /logout         -> logout
/// GET    /profile        -> get_profile
/// PATCH  /profile        -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route(
            "/profile",
            get(profile::get_profile).patch(profile::update_profile),
        )
}
