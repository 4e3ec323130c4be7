//! In-process storage backends for development and tests.
//!
//! Each backend keeps its state behind a single Tokio mutex, so every
//! operation is atomic with respect to the others, mirroring the
//! per-statement atomicity of the PostgreSQL backend.

mod booking;
mod inventory;

pub use booking::MemoryReservationLedger;
pub use inventory::MemoryInventoryStore;
