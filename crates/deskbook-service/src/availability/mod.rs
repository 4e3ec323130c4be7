//! Availability, presence, and per-item status over the ledger and snapshot.

pub mod service;
pub mod week;

pub use service::{
    AvailabilityService, DayAvailability, ItemAvailability, ItemGroupAvailability, ItemStatus,
    PresenceEntry,
};
pub use week::{WEEKDAY_CODES, parse_iso_week, week_dates, weeks_in_year};
