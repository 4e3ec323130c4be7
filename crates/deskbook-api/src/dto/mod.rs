//! Request and response DTOs.

pub mod request;
pub mod response;

pub use request::{AvailabilityQuery, DateQuery, HistoryQuery, ListBookingsQuery};
pub use response::{ApiResponse, HealthResponse};
