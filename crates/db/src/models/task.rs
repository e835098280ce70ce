//! Task entity model and inputs.

use serde::Serialize;
use sqlx::FromRow;
use ideatrack_core::types::{DbId, Timestamp};

use crate::models::status::TaskStatus;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<Timestamp>,
    pub assigned_to_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for creating a task.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<Timestamp>,
    pub assigned_to_id: Option<DbId>,
}

/// Validated task patch. `None` leaves a column unchanged; for the nullable
/// columns `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<Timestamp>>,
    pub assigned_to_id: Option<Option<DbId>>,
}

impl UpdateTask {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.assigned_to_id.is_none()
    }
}
