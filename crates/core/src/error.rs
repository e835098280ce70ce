//! Domain errors shared by the repositories and the HTTP layer.
//!
//! The API crate turns each variant into a status code and a JSON body; the
//! status each one maps to is noted on the variant.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No visible record with this id. Records owned by someone else are
    /// reported the same way. `404`.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a field or business rule; the message is shown to the
    /// caller as is. `400`.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness rule (email, idea title, project name, task title within
    /// a project) would be broken. `409`.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, invalid or expired credentials. `401`.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but the role does not allow the action. `403`.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Logged server-side; the caller only sees a generic message. `500`.
    #[error("Internal error: {0}")]
    Internal(String),
}
