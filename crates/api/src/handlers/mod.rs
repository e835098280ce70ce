pub mod analytics;
pub mod auth;
pub mod idea;
pub mod profile;
pub mod project;
pub mod task;

use ideatrack_core::error::CoreError;

use crate::error::AppError;

/// Rejection for a PATCH/PUT body that names no updatable field.
pub(crate) fn empty_update() -> AppError {
    AppError::Core(CoreError::Validation(
        "No fields provided for update".into(),
    ))
}
