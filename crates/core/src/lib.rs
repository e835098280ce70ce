//! Domain rules shared by the IdeaTrack store and API layers.
//!
//! Nothing in this crate performs I/O: it holds the error taxonomy, id and
//! timestamp aliases, and the pure validation and normalization helpers the
//! entity handlers run before touching the database.

pub mod dates;
pub mod error;
pub mod pagination;
pub mod patch;
pub mod roles;
pub mod task_status;
pub mod types;
pub mod validation;
