//! Immutable, point-in-time copy of the inventory.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::tree::{Area, InventoryTree, Item, ItemGroup};

/// A read-only inventory tree with pre-computed lookup indexes.
///
/// Once built a snapshot never changes; a reload produces a new value that
/// replaces the old one wholesale.
#[derive(Debug, Clone)]
pub struct InventorySnapshot {
    version: u64,
    loaded_at: DateTime<Utc>,
    tree: InventoryTree,
    areas: HashMap<String, usize>,
    item_groups: HashMap<String, (usize, usize)>,
    items: HashMap<String, (usize, usize, usize)>,
}

/// Where an item sits in the hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct ItemLocation<'a> {
    pub area: &'a Area,
    pub item_group: &'a ItemGroup,
    pub item: &'a Item,
}

impl InventorySnapshot {
    /// Index `tree` as snapshot number `version`.
    pub fn new(version: u64, tree: InventoryTree) -> Self {
        let mut areas = HashMap::new();
        let mut item_groups = HashMap::new();
        let mut items = HashMap::new();

        for (a, area) in tree.areas.iter().enumerate() {
            areas.insert(area.id.clone(), a);
            for (g, group) in area.item_groups.iter().enumerate() {
                item_groups.insert(group.id.clone(), (a, g));
                for (i, item) in group.items.iter().enumerate() {
                    items.insert(item.id.clone(), (a, g, i));
                }
            }
        }

        Self {
            version,
            loaded_at: Utc::now(),
            tree,
            areas,
            item_groups,
            items,
        }
    }

    /// The placeholder served before the first load.
    pub fn empty() -> Self {
        Self::new(0, InventoryTree::default())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn areas(&self) -> &[Area] {
        &self.tree.areas
    }

    pub fn find_area(&self, id: &str) -> Option<&Area> {
        self.areas.get(id).map(|&a| &self.tree.areas[a])
    }

    /// Look up an item group together with its owning area.
    pub fn find_item_group(&self, id: &str) -> Option<(&Area, &ItemGroup)> {
        self.item_groups.get(id).map(|&(a, g)| {
            let area = &self.tree.areas[a];
            (area, &area.item_groups[g])
        })
    }

    pub fn find_item(&self, id: &str) -> Option<ItemLocation<'_>> {
        self.items.get(id).map(|&(a, g, i)| {
            let area = &self.tree.areas[a];
            let item_group = &area.item_groups[g];
            ItemLocation {
                area,
                item_group,
                item: &item_group.items[i],
            }
        })
    }

    pub fn contains_item(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Number of areas, item groups, and items.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.areas.len(), self.item_groups.len(), self.items.len())
    }
}
