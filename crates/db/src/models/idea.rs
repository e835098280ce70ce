//! Idea entity model and inputs.

use serde::Serialize;
use sqlx::FromRow;
use ideatrack_core::types::{DbId, Timestamp};

use crate::models::status::{IdeaPriority, IdeaStatus};

/// An idea row from the `ideas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: IdeaStatus,
    pub tags: Vec<String>,
    pub priority: Option<IdeaPriority>,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for creating an idea.
#[derive(Debug, Clone)]
pub struct CreateIdea {
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: IdeaStatus,
    pub tags: Vec<String>,
    pub priority: Option<IdeaPriority>,
}

/// Validated idea patch. `None` leaves a column unchanged; for the nullable
/// columns `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateIdea {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<IdeaStatus>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<Option<IdeaPriority>>,
}

impl UpdateIdea {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.tags.is_none()
            && self.priority.is_none()
    }
}
