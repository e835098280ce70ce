//! Aggregate row shapes.

use serde::Serialize;
use sqlx::FromRow;

use crate::models::status::IdeaStatus;

/// One bucket of the ideas-by-status aggregate.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: IdeaStatus,
    pub count: i64,
}
