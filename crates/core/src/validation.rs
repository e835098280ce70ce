//! Request validation helpers.
//!
//! Request DTOs derive [`validator::Validate`] for shape rules; the helpers
//! here cover what derive attributes cannot express (trimming, blank checks)
//! and fold [`ValidationErrors`] into a single [`CoreError::Validation`].

use validator::ValidationErrors;

use crate::error::CoreError;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Convert derive-generated validation errors into a human-readable
/// [`CoreError::Validation`].
///
/// Field order is sorted so the message is stable across runs. Each rule
/// contributes its `message` when one was given, otherwise
/// `"<field> is invalid"`.
pub fn into_core_error(errors: ValidationErrors) -> CoreError {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let field = field.to_string();
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
                .collect();
            (field, messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut messages: Vec<String> = fields.into_iter().flat_map(|(_, m)| m).collect();
    messages.dedup();

    if messages.is_empty() {
        return CoreError::Validation("Invalid request".into());
    }
    CoreError::Validation(messages.join("; "))
}

/// Require a present, non-blank string and return it trimmed.
///
/// `message` is used verbatim as the validation error (e.g. `"Title is required"`).
pub fn require_non_blank(value: Option<String>, message: &str) -> Result<String, CoreError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::Validation(message.to_string())),
    }
}

/// Trim a string that, when present, must not be blank.
pub fn non_blank_if_present(value: Option<String>, message: &str) -> Result<Option<String>, CoreError> {
    value
        .map(|v| require_non_blank(Some(v), message))
        .transpose()
}

/// Trim an optional free-text value. Whitespace-only text becomes `None`.
pub fn trim_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fallback display name for a new account: the local part of the email.
pub fn default_user_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}
