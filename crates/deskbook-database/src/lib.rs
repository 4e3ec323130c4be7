//! # deskbook-database
//!
//! Storage contracts for the inventory and the reservation ledger, with a
//! PostgreSQL implementation (`repositories`) and an in-process
//! implementation (`memory`) that enforces the same uniqueness and
//! parent/child rules.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod traits;

pub use connection::DatabasePool;
pub use memory::{MemoryInventoryStore, MemoryReservationLedger};
pub use repositories::{PgInventoryStore, PgReservationLedger};
pub use traits::{InventoryStore, ReservationLedger};
