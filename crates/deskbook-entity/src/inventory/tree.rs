//! The Area → ItemGroup → Item tree.
//!
//! The same types describe the declarative seed file and the payload of an
//! [`InventorySnapshot`](super::InventorySnapshot), so a declaration and a
//! store reload produce structurally identical values.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use validator::Validate;

use deskbook_core::{AppError, AppResult};

use super::model::{AreaRecord, ItemGroupRecord, ItemRecord};
use crate::validation::non_blank;

/// The full inventory hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct InventoryTree {
    /// Top-level areas.
    #[serde(default)]
    #[validate(nested)]
    pub areas: Vec<Area>,
}

/// A top-level location such as an office floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Area {
    #[validate(custom(function = "non_blank"))]
    pub id: String,
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan: Option<String>,
    /// Item groups in this area.
    #[serde(default, alias = "rooms")]
    #[validate(nested)]
    pub item_groups: Vec<ItemGroup>,
}

/// A room-like grouping of bookable items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ItemGroup {
    #[validate(custom(function = "non_blank"))]
    pub id: String,
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan: Option<String>,
    /// Bookable items in this group.
    #[serde(default, alias = "desks")]
    #[validate(nested)]
    pub items: Vec<Item>,
}

/// The smallest bookable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Item {
    #[validate(custom(function = "non_blank"))]
    pub id: String,
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Outcome of reconciling the store with a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub areas_created: usize,
    pub item_groups_created: usize,
    pub items_created: usize,
}

impl SyncReport {
    /// Total number of nodes created.
    pub fn total(&self) -> usize {
        self.areas_created + self.item_groups_created + self.items_created
    }
}

impl InventoryTree {
    /// Build a tree from flat stored rows.
    ///
    /// Every level is ordered by name, ties broken by id. Rows whose parent
    /// is absent from the input are dropped.
    pub fn assemble(
        mut areas: Vec<AreaRecord>,
        mut item_groups: Vec<ItemGroupRecord>,
        mut items: Vec<ItemRecord>,
    ) -> Self {
        areas.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        item_groups.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let mut items_by_group: HashMap<String, Vec<Item>> = HashMap::new();
        for item in items {
            items_by_group
                .entry(item.item_group_id)
                .or_default()
                .push(Item {
                    id: item.id,
                    name: item.name,
                    equipment: item.equipment,
                    warning: item.warning,
                });
        }

        let mut groups_by_area: HashMap<String, Vec<ItemGroup>> = HashMap::new();
        for group in item_groups {
            let items = items_by_group.remove(&group.id).unwrap_or_default();
            groups_by_area
                .entry(group.area_id)
                .or_default()
                .push(ItemGroup {
                    id: group.id,
                    name: group.name,
                    description: group.description,
                    floor_plan: group.floor_plan,
                    items,
                });
        }

        let areas = areas
            .into_iter()
            .map(|area| Area {
                item_groups: groups_by_area.remove(&area.id).unwrap_or_default(),
                id: area.id,
                name: area.name,
                description: area.description,
                floor_plan: area.floor_plan,
            })
            .collect();

        Self { areas }
    }

    /// Validate required fields and id uniqueness per entity type.
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;

        let mut area_ids = HashSet::new();
        let mut group_ids = HashSet::new();
        let mut item_ids = HashSet::new();

        for area in &self.areas {
            if !area_ids.insert(area.id.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate area id '{}'",
                    area.id
                )));
            }
            for group in &area.item_groups {
                if !group_ids.insert(group.id.as_str()) {
                    return Err(AppError::validation(format!(
                        "Duplicate item group id '{}'",
                        group.id
                    )));
                }
                for item in &group.items {
                    if !item_ids.insert(item.id.as_str()) {
                        return Err(AppError::validation(format!(
                            "Duplicate item id '{}'",
                            item.id
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Number of areas, item groups, and items in the tree.
    pub fn counts(&self) -> (usize, usize, usize) {
        let groups = self.areas.iter().map(|a| a.item_groups.len()).sum();
        let items = self
            .areas
            .iter()
            .flat_map(|a| &a.item_groups)
            .map(|g| g.items.len())
            .sum();
        (self.areas.len(), groups, items)
    }
}

impl Area {
    /// Ids of every item in this area, in tree order.
    pub fn item_ids(&self) -> Vec<String> {
        self.item_groups
            .iter()
            .flat_map(|g| g.items.iter().map(|i| i.id.clone()))
            .collect()
    }
}
