//! Admin-only handlers.

pub mod inventory;
pub mod snapshot;
