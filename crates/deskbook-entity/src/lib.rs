//! # deskbook-entity
//!
//! Domain entity models for Deskbook. Row structs mirror database tables and
//! derive `sqlx::FromRow`; the inventory tree types double as the
//! declarative seed format and as the payload of the immutable
//! [`InventorySnapshot`](inventory::InventorySnapshot).

pub mod booking;
pub mod declaration;
pub mod inventory;
mod validation;
