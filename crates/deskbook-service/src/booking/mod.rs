//! The booking conflict engine and booking listings.

pub mod service;
pub mod view;

pub use service::{BookingService, CreateBookingRequest, GuestDetails};
pub use view::BookingView;
