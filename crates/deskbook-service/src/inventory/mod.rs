//! Inventory snapshot holder, admin workflow, and read surface.

pub mod holder;
pub mod service;
pub mod view;

pub use holder::{InventorySnapshotHolder, SnapshotProvider};
pub use service::InventoryService;
pub use view::{AreaSummary, ItemGroupSummary, SnapshotSummary};
