//! PostgreSQL implementations of the storage contracts.

pub mod booking;
pub mod inventory;

pub use booking::PgReservationLedger;
pub use inventory::PgInventoryStore;
