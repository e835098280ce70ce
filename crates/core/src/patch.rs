//! Tri-state fields for partial updates.
//!
//! A nullable column in a PATCH body has three meanings: the key is absent
//! (leave the column alone), the key is `null` (clear it), or the key holds a
//! value (set it). Plain `Option<Option<T>>` collapses the first two because
//! serde maps `null` to the outer `None`, so nullable patch fields use
//! [`deserialize_some`]:
//!
//! ```
//! use serde::Deserialize;
//! use ideatrack_core::patch::deserialize_some;
//!
//! #[derive(Deserialize)]
//! struct Patch {
//!     #[serde(default, deserialize_with = "deserialize_some")]
//!     description: Option<Option<String>>,
//! }
//!
//! let absent: Patch = serde_json::from_str("{}").unwrap();
//! assert_eq!(absent.description, None);
//!
//! let cleared: Patch = serde_json::from_str(r#"{"description": null}"#).unwrap();
//! assert_eq!(cleared.description, Some(None));
//! ```

use serde::{Deserialize, Deserializer};

/// Wrap whatever is present (including `null`) in `Some`.
///
/// Pair with `#[serde(default)]` so an absent key stays `None`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Split a tri-state field into the `(provided, value)` pair bound by
/// `CASE WHEN $n THEN $m ELSE column END` update statements.
pub fn split<T>(field: Option<Option<T>>) -> (bool, Option<T>) {
    match field {
        Some(inner) => (true, inner),
        None => (false, None),
    }
}
