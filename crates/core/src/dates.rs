//! Parsing for client-supplied dates (`dueDate`, `startDate`, `endDate`).

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Parse a date input into a UTC timestamp.
///
/// Accepts a full RFC 3339 timestamp (`2025-07-15T09:30:00Z`, any offset) or
/// a bare calendar date (`2025-07-15`), which is taken as midnight UTC.
pub fn parse_date_input(field: &str, raw: &str) -> Result<Timestamp, CoreError> {
    let value = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(CoreError::Validation(format!(
        "{field} must be an RFC 3339 timestamp or a YYYY-MM-DD date"
    )))
}

/// Parse an optional date input, passing `None` through.
pub fn parse_optional_date(field: &str, raw: Option<&str>) -> Result<Option<Timestamp>, CoreError> {
    raw.map(|v| parse_date_input(field, v)).transpose()
}
