//! Read-model shapes served from the snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deskbook_entity::inventory::{Area, InventorySnapshot, ItemGroup};

/// An area without its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub floor_plan: Option<String>,
    pub item_group_count: usize,
    pub item_count: usize,
}

impl From<&Area> for AreaSummary {
    fn from(area: &Area) -> Self {
        Self {
            id: area.id.clone(),
            name: area.name.clone(),
            description: area.description.clone(),
            floor_plan: area.floor_plan.clone(),
            item_group_count: area.item_groups.len(),
            item_count: area.item_groups.iter().map(|g| g.items.len()).sum(),
        }
    }
}

/// An item group without its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemGroupSummary {
    pub id: String,
    pub area_id: String,
    pub name: String,
    pub description: Option<String>,
    pub floor_plan: Option<String>,
    pub item_count: usize,
}

impl ItemGroupSummary {
    pub fn new(area_id: &str, group: &ItemGroup) -> Self {
        Self {
            id: group.id.clone(),
            area_id: area_id.to_string(),
            name: group.name.clone(),
            description: group.description.clone(),
            floor_plan: group.floor_plan.clone(),
            item_count: group.items.len(),
        }
    }
}

/// Identity and size of a snapshot, returned by an explicit reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub areas: usize,
    pub item_groups: usize,
    pub items: usize,
}

impl From<&InventorySnapshot> for SnapshotSummary {
    fn from(snapshot: &InventorySnapshot) -> Self {
        let (areas, item_groups, items) = snapshot.counts();
        Self {
            version: snapshot.version(),
            loaded_at: snapshot.loaded_at(),
            areas,
            item_groups,
            items,
        }
    }
}
