//! Query-string DTOs. JSON bodies deserialize straight into the entity and
//! service input types.

use serde::Deserialize;

/// `GET /api/areas/{id}/availability`
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    /// ISO week token (`2026-W12`); empty or absent means the current week.
    #[serde(default)]
    pub week: String,
    /// Days of the week to report, 5 or 7.
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    5
}

/// `?date=YYYY-MM-DD`, defaulting to today.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// `GET /api/bookings/history`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// `GET /api/bookings`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBookingsQuery {
    /// Earliest booking date to list; defaults to today.
    pub from: Option<String>,
}
