//! Route definitions for the `/projects` resource.
//!
//! Also nests task routes under `/projects/{project_id}/tasks`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// PATCH  /{id}                              -> update
/// DELETE /{id}                              -> delete
///
/// GET    /{project_id}/tasks                -> list_by_project
/// POST   /{project_id}/tasks                -> create
/// GET    /{project_id}/tasks/{task_id}      -> get_by_id
/// PUT    /{project_id}/tasks/{task_id}      -> update
/// PATCH  /{project_id}/tasks/{task_id}      -> update
/// DELETE /{project_id}/tasks/{task_id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new()
        .route("/", get(task::list_by_project).post(task::create))
        .route(
            "/{task_id}",
            get(task::get_by_id)
                .put(task::update)
                .patch(task::update)
                .delete(task::delete),
        );

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .patch(project::update)
                .delete(project::delete),
        )
        .nest("/{project_id}/tasks", task_routes)
}
