//! Reservation ledger entries.

pub mod model;

pub use model::{Booking, BookingCounts, NewBooking};
