//! Calendar-date helpers.
//!
//! Bookings carry a plain calendar date with no time component. All layers
//! exchange dates as `YYYY-MM-DD` strings and compare them against the
//! current UTC day.

use chrono::{NaiveDate, Utc};

use crate::error::AppError;
use crate::result::AppResult;

/// Wire format for booking dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The current calendar date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a `YYYY-MM-DD` string, reporting a validation error that names
/// the offending field.
pub fn parse_booking_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        AppError::validation(format!(
            "{field} must be in YYYY-MM-DD format: {}",
            value.trim()
        ))
    })
}

/// Parse an optional date parameter; blank input yields `None`.
pub fn parse_optional_date(field: &str, value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_booking_date(field, v).map(Some),
    }
}

/// Render a date in wire format.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
