use axum::routing::{get, post};
use axum::Router;

use crate::handlers::idea;
use crate::state::AppState;

/// Routes mounted at `/ideas`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// PATCH  /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/convert   -> convert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(idea::list).post(idea::create))
        .route(
            "/{id}",
            get(idea::get_by_id)
                .put(idea::update)
                .patch(idea::update)
                .delete(idea::delete),
        )
        .route("/{id}/convert", post(idea::convert))
}
