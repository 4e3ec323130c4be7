//! Core type definitions used across the Deskbook workspace.

pub mod date;

pub use date::{format_date, parse_booking_date, parse_optional_date, today};
