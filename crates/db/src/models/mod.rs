//! Row models, typed inputs, and status enums.
//!
//! Row structs serialize straight to API responses (camelCase keys), except
//! [`user::User`], which carries the password hash and is exposed only through
//! [`user::UserResponse`]. `Create*`/`Update*` structs are fully validated
//! inputs built by the API layer; they are never deserialized from requests.

pub mod analytics;
pub mod idea;
pub mod project;
pub mod status;
pub mod task;
pub mod user;
