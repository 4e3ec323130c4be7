//! Request handlers, one module per resource.

pub mod admin;
pub mod areas;
pub mod bookings;
pub mod health;
pub mod item_groups;
