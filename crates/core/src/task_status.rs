//! Task status input normalization.
//!
//! Clients send task statuses either as display labels (`"To Do"`) or as the
//! canonical names stored in the `task_status` enum (`"Todo"`). Everything is
//! normalized to the canonical name before it reaches the database.

use crate::error::CoreError;

pub const TASK_TODO: &str = "Todo";
pub const TASK_IN_PROGRESS: &str = "InProgress";
pub const TASK_DONE: &str = "Done";
pub const TASK_BLOCKED: &str = "Blocked";

/// Message returned for any status outside the alias table.
pub const INVALID_TASK_STATUS: &str = "Invalid Task Status";

/// Map an accepted status label to its canonical name.
///
/// | input                          | canonical    |
/// |--------------------------------|--------------|
/// | `To Do`, `Todo`                | `Todo`       |
/// | `In Progress`, `InProgress`    | `InProgress` |
/// | `Done`                         | `Done`       |
/// | `Blocked`                      | `Blocked`    |
pub fn canonical_task_status(input: &str) -> Option<&'static str> {
    match input {
        "To Do" | "Todo" => Some(TASK_TODO),
        "In Progress" | "InProgress" => Some(TASK_IN_PROGRESS),
        "Done" => Some(TASK_DONE),
        "Blocked" => Some(TASK_BLOCKED),
        _ => None,
    }
}

/// Like [`canonical_task_status`] but rejects unknown input with a
/// validation error.
pub fn normalize_task_status(input: &str) -> Result<&'static str, CoreError> {
    canonical_task_status(input).ok_or_else(|| CoreError::Validation(INVALID_TASK_STATUS.into()))
}
