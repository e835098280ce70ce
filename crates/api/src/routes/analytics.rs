use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics`.
///
/// ```text
/// GET    /ideas-by-status   -> ideas_by_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/ideas-by-status", get(analytics::ideas_by_status))
}
