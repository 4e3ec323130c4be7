//! # deskbook-service
//!
//! Business logic for Deskbook. Services hold their storage backends as
//! trait objects and read the inventory through a [`SnapshotProvider`], so
//! the same code runs on PostgreSQL and on the in-memory backends.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references.

pub mod availability;
pub mod booking;
pub mod context;
pub mod inventory;

pub use availability::AvailabilityService;
pub use booking::BookingService;
pub use context::{RequestContext, Role};
pub use inventory::{InventoryService, InventorySnapshotHolder, SnapshotProvider};
