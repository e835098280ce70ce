pub mod analytics;
pub mod auth;
pub mod health;
pub mod idea;
pub mod project;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                                   login (public)
///
/// /auth/register                           register (public)
/// /auth/login                              login (public)
/// /auth/logout                             logout (public, clears cookie)
/// /auth/profile                            get, patch
///
/// /ideas                                   list, create
/// /ideas/{id}                              get, put, patch, delete
/// /ideas/{id}/convert                      convert to project (POST)
///
/// /projects                                list (paged), create
/// /projects/{id}                           get, put, patch, delete
/// /projects/{project_id}/tasks             list, create
/// /projects/{project_id}/tasks/{task_id}   get, put, patch, delete
///
/// /analytics/ideas-by-status               counts per idea status
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .nest("/auth", auth::router())
        .nest("/ideas", idea::router())
        .nest("/projects", project::router())
        .nest("/analytics", analytics::router())
}
