//! Well-known role name constants and role-set validation.
//!
//! Roles are stored as a `TEXT[]` on the `users` row and copied into every
//! access token, so the set below is the complete vocabulary.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Every role the system understands.
pub const KNOWN_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];

/// Roles assigned at registration when none are requested.
pub fn default_roles() -> Vec<String> {
    vec![ROLE_USER.to_string()]
}

/// Check whether a role name is part of the known vocabulary.
pub fn is_known_role(role: &str) -> bool {
    KNOWN_ROLES.contains(&role)
}

/// Whether a role set grants administrator rights.
pub fn has_admin(roles: &[String]) -> bool {
    roles.iter().any(|r| r == ROLE_ADMIN)
}

/// Validate and normalize a requested role set.
///
/// Trims each entry, rejects unknown names, and removes duplicates while
/// keeping first-seen order. An empty request yields the default roles.
pub fn normalize_roles(requested: &[String]) -> Result<Vec<String>, CoreError> {
    let mut roles: Vec<String> = Vec::with_capacity(requested.len());
    for raw in requested {
        let role = raw.trim();
        if !is_known_role(role) {
            return Err(CoreError::Validation(format!(
                "Unknown role '{role}'. Expected one of: {}",
                KNOWN_ROLES.join(", ")
            )));
        }
        if !roles.iter().any(|r| r == role) {
            roles.push(role.to_string());
        }
    }

    if roles.is_empty() {
        return Ok(default_roles());
    }
    Ok(roles)
}
