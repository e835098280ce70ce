//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods on owner-scoped
//! tables take the caller's user id and fold it into the `WHERE` clause, so
//! a row owned by someone else is indistinguishable from a missing one.

pub mod idea_repo;
pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub use idea_repo::IdeaRepo;
pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
