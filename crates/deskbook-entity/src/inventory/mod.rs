//! Inventory hierarchy: areas, item groups, and items.

pub mod model;
pub mod snapshot;
pub mod tree;

pub use model::{
    AreaChanges, AreaRecord, ItemChanges, ItemGroupChanges, ItemGroupRecord, ItemRecord, NewArea,
    NewItem, NewItemGroup,
};
pub use snapshot::{InventorySnapshot, ItemLocation};
pub use tree::{Area, InventoryTree, Item, ItemGroup, SyncReport};
