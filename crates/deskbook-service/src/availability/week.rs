//! ISO-8601 week arithmetic.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use deskbook_core::types::today;
use deskbook_core::{AppError, AppResult};

/// Two-letter weekday codes, Monday first.
pub const WEEKDAY_CODES: [&str; 7] = ["MO", "TU", "WE", "TH", "FR", "SA", "SU"];

/// Number of ISO weeks in `year` (52 or 53): the week of December 28th.
pub fn weeks_in_year(year: i32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, 12, 28).map(|d| d.iso_week().week())
}

/// Resolve a `YYYY-Www` token (one- or two-digit week) to the Monday of
/// that ISO week. An empty token means the current UTC week.
pub fn parse_iso_week(token: &str) -> AppResult<NaiveDate> {
    parse_iso_week_on(token, today())
}

/// [`parse_iso_week`] with an explicit "today".
pub fn parse_iso_week_on(token: &str, today: NaiveDate) -> AppResult<NaiveDate> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(monday_of(today));
    }

    let invalid = || AppError::validation(format!("Invalid week '{token}', expected YYYY-Www"));

    let (year, week) = token.split_once("-W").ok_or_else(invalid)?;
    if year.len() != 4 || !(1..=2).contains(&week.len()) {
        return Err(invalid());
    }
    if !year.bytes().all(|b| b.is_ascii_digit()) || !week.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let week: u32 = week.parse().map_err(|_| invalid())?;

    let max = weeks_in_year(year).ok_or_else(invalid)?;
    if week < 1 || week > max {
        return Err(AppError::validation(format!(
            "Week {week} is out of range for {year} (1-{max})"
        )));
    }

    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(invalid)
}

/// `day_count` consecutive dates starting at `monday`. Only working weeks
/// (5) and full weeks (7) are accepted.
pub fn week_dates(monday: NaiveDate, day_count: u32) -> AppResult<Vec<NaiveDate>> {
    if day_count != 5 && day_count != 7 {
        return Err(AppError::validation("days must be 5 or 7"));
    }
    (0..u64::from(day_count))
        .map(|offset| {
            monday
                .checked_add_days(Days::new(offset))
                .ok_or_else(|| AppError::validation("Week is out of the supported date range"))
        })
        .collect()
}

/// Two-letter code for the weekday of `date`.
pub fn weekday_code(date: NaiveDate) -> &'static str {
    WEEKDAY_CODES[date.weekday().num_days_from_monday() as usize]
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(date)
}
