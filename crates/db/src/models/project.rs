//! Project entity model and inputs.

use serde::Serialize;
use sqlx::FromRow;
use ideatrack_core::types::{DbId, Timestamp};

use crate::models::status::ProjectStatus;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub owner_id: DbId,
    pub assigned_to_user_ids: Vec<DbId>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub budget: Option<f64>,
    /// The idea this project was converted from, if any.
    pub idea_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub assigned_to_user_ids: Vec<DbId>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub budget: Option<f64>,
    pub idea_id: Option<DbId>,
}

/// Validated project patch. `None` leaves a column unchanged; for the
/// nullable columns `Some(None)` clears it. The owner is not patchable.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    pub assigned_to_user_ids: Option<Vec<DbId>>,
    pub start_date: Option<Option<Timestamp>>,
    pub end_date: Option<Option<Timestamp>>,
    pub budget: Option<Option<f64>>,
    pub idea_id: Option<Option<DbId>>,
}

impl UpdateProject {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assigned_to_user_ids.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.budget.is_none()
            && self.idea_id.is_none()
    }
}
