//! Helpers for turning form text into stored values.
//!
//! Drafts hold exactly what the inputs hold: strings. These functions apply
//! the only validation the inputs would enforce on their own (required,
//! date/time shape) and the numeric fallback to zero.

use crate::error::{ChurchError, ChurchResult};
use chrono::{Local, NaiveDate, NaiveTime};
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Trimmed text, or `None` when blank.
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trimmed text; blank is a validation error naming `field`.
pub fn required(field: &str, value: &str) -> ChurchResult<String> {
    optional(value).ok_or_else(|| ChurchError::validation(format!("{} is required", field)))
}

/// Parse a numeric input, falling back to zero on anything non-numeric.
pub fn parse_or_zero<T>(value: &str) -> T
where
    T: FromStr + Default,
{
    value.trim().parse().unwrap_or_default()
}

/// Validate a `YYYY-MM-DD` date.
pub fn date(field: &str, value: &str) -> ChurchResult<String> {
    let value = required(field, value)?;
    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map_err(|_| ChurchError::validation(format!("{} must be a date (YYYY-MM-DD)", field)))?;
    Ok(value)
}

/// Validate an optional `YYYY-MM-DD` date.
pub fn optional_date(field: &str, value: &str) -> ChurchResult<Option<String>> {
    match optional(value) {
        Some(value) => date(field, &value).map(Some),
        None => Ok(None),
    }
}

/// Validate an optional `HH:MM` time.
pub fn optional_time(field: &str, value: &str) -> ChurchResult<Option<String>> {
    match optional(value) {
        Some(value) => {
            NaiveTime::parse_from_str(&value, TIME_FORMAT).map_err(|_| {
                ChurchError::validation(format!("{} must be a time (HH:MM)", field))
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today's date as form text.
pub fn today_string() -> String {
    today().format(DATE_FORMAT).to_string()
}
