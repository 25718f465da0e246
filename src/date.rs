//! Date-string parsing
//!
//! Small helpers for reading calendar dates and timestamps out of untyped
//! field values.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::collection::KeyedCollection;
use crate::error::{FieldkitError, Result};
use crate::symbol::Key;

/// Calendar date format accepted by `parse_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|e| FieldkitError::InvalidDate(format!("{:?}: {}", text, e)))
}

/// Parse an RFC 3339 timestamp, normalized to UTC
pub fn parse_datetime(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FieldkitError::InvalidDate(format!("{:?}: {}", text, e)))
}

/// Read a date-valued field.
///
/// Absent or `null` reads as `None`; anything other than a parsable date
/// string is an error.
pub fn date_field(fields: &KeyedCollection<Key, Value>, key: &Key) -> Result<Option<NaiveDate>> {
    match fields.fetch(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => parse_date(text).map(Some),
        Some(other) => Err(FieldkitError::InvalidDate(format!(
            "{} is not a date string: {}",
            key, other
        ))),
    }
}
