//! In-memory inventory store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;
use validator::Validate;

use deskbook_core::{AppError, AppResult};
use deskbook_entity::inventory::{
    AreaChanges, AreaRecord, InventoryTree, ItemChanges, ItemGroupChanges, ItemGroupRecord,
    ItemRecord, NewArea, NewItem, NewItemGroup, SyncReport,
};

use crate::traits::{InventoryStore, require_id};

#[derive(Debug, Default)]
struct InnerState {
    areas: BTreeMap<String, AreaRecord>,
    item_groups: BTreeMap<String, ItemGroupRecord>,
    items: BTreeMap<String, ItemRecord>,
}

impl InnerState {
    fn insert_area(&mut self, input: &NewArea) -> AppResult<AreaRecord> {
        if self.areas.contains_key(&input.id) {
            return Err(AppError::conflict(format!(
                "Area '{}' already exists",
                input.id
            )));
        }
        let now = Utc::now();
        let record = AreaRecord {
            id: input.id.clone(),
            name: input.name.clone(),
            description: input.description.clone(),
            floor_plan: input.floor_plan.clone(),
            created_at: now,
            updated_at: now,
        };
        self.areas.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn insert_item_group(&mut self, input: &NewItemGroup) -> AppResult<ItemGroupRecord> {
        if self.item_groups.contains_key(&input.id) {
            return Err(AppError::conflict(format!(
                "Item group '{}' already exists",
                input.id
            )));
        }
        if !self.areas.contains_key(&input.area_id) {
            return Err(AppError::not_found(format!(
                "Area '{}' not found",
                input.area_id
            )));
        }
        let now = Utc::now();
        let record = ItemGroupRecord {
            id: input.id.clone(),
            area_id: input.area_id.clone(),
            name: input.name.clone(),
            description: input.description.clone(),
            floor_plan: input.floor_plan.clone(),
            created_at: now,
            updated_at: now,
        };
        self.item_groups.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn insert_item(&mut self, input: &NewItem) -> AppResult<ItemRecord> {
        if self.items.contains_key(&input.id) {
            return Err(AppError::conflict(format!(
                "Item '{}' already exists",
                input.id
            )));
        }
        if !self.item_groups.contains_key(&input.item_group_id) {
            return Err(AppError::not_found(format!(
                "Item group '{}' not found",
                input.item_group_id
            )));
        }
        let now = Utc::now();
        let record = ItemRecord {
            id: input.id.clone(),
            item_group_id: input.item_group_id.clone(),
            name: input.name.clone(),
            equipment: input.equipment.clone(),
            warning: input.warning.clone(),
            created_at: now,
            updated_at: now,
        };
        self.items.insert(record.id.clone(), record.clone());
        Ok(record)
    }
}

/// Inventory store held entirely in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryInventoryStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn create_area(&self, input: &NewArea) -> AppResult<AreaRecord> {
        input.validate()?;
        self.state.lock().await.insert_area(input)
    }

    async fn update_area(&self, id: &str, changes: &AreaChanges) -> AppResult<AreaRecord> {
        require_id("id", id)?;
        changes.validate()?;

        let mut state = self.state.lock().await;
        let area = state
            .areas
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Area '{id}' not found")))?;
        area.name = changes.name.clone();
        area.description = changes.description.clone();
        area.floor_plan = changes.floor_plan.clone();
        area.updated_at = Utc::now();
        Ok(area.clone())
    }

    async fn delete_area(&self, id: &str) -> AppResult<()> {
        require_id("id", id)?;

        let mut state = self.state.lock().await;
        if !state.areas.contains_key(id) {
            return Err(AppError::not_found(format!("Area '{id}' not found")));
        }
        if state.item_groups.values().any(|g| g.area_id == id) {
            return Err(AppError::conflict(format!(
                "Area '{id}' still contains item groups"
            )));
        }
        state.areas.remove(id);
        Ok(())
    }

    async fn get_area(&self, id: &str) -> AppResult<AreaRecord> {
        self.state
            .lock()
            .await
            .areas
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Area '{id}' not found")))
    }

    async fn create_item_group(&self, input: &NewItemGroup) -> AppResult<ItemGroupRecord> {
        input.validate()?;
        self.state.lock().await.insert_item_group(input)
    }

    async fn update_item_group(
        &self,
        id: &str,
        changes: &ItemGroupChanges,
    ) -> AppResult<ItemGroupRecord> {
        require_id("id", id)?;
        changes.validate()?;

        let mut state = self.state.lock().await;
        let group = state
            .item_groups
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Item group '{id}' not found")))?;
        group.name = changes.name.clone();
        group.description = changes.description.clone();
        group.floor_plan = changes.floor_plan.clone();
        group.updated_at = Utc::now();
        Ok(group.clone())
    }

    async fn delete_item_group(&self, id: &str) -> AppResult<()> {
        require_id("id", id)?;

        let mut state = self.state.lock().await;
        if !state.item_groups.contains_key(id) {
            return Err(AppError::not_found(format!("Item group '{id}' not found")));
        }
        if state.items.values().any(|i| i.item_group_id == id) {
            return Err(AppError::conflict(format!(
                "Item group '{id}' still contains items"
            )));
        }
        state.item_groups.remove(id);
        Ok(())
    }

    async fn get_item_group(&self, id: &str) -> AppResult<ItemGroupRecord> {
        self.state
            .lock()
            .await
            .item_groups
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Item group '{id}' not found")))
    }

    async fn create_item(&self, input: &NewItem) -> AppResult<ItemRecord> {
        input.validate()?;
        self.state.lock().await.insert_item(input)
    }

    async fn update_item(&self, id: &str, changes: &ItemChanges) -> AppResult<ItemRecord> {
        require_id("id", id)?;
        changes.validate()?;

        let mut state = self.state.lock().await;
        let item = state
            .items
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Item '{id}' not found")))?;
        item.name = changes.name.clone();
        item.equipment = changes.equipment.clone();
        item.warning = changes.warning.clone();
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn delete_item(&self, id: &str) -> AppResult<()> {
        require_id("id", id)?;

        self.state
            .lock()
            .await
            .items
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Item '{id}' not found")))
    }

    async fn get_item(&self, id: &str) -> AppResult<ItemRecord> {
        self.state
            .lock()
            .await
            .items
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Item '{id}' not found")))
    }

    async fn sync_from_declaration(&self, tree: &InventoryTree) -> AppResult<SyncReport> {
        tree.check()?;

        let mut state = self.state.lock().await;
        let mut report = SyncReport::default();

        for area in &tree.areas {
            if !state.areas.contains_key(&area.id) {
                state.insert_area(&NewArea {
                    id: area.id.clone(),
                    name: area.name.clone(),
                    description: area.description.clone(),
                    floor_plan: area.floor_plan.clone(),
                })?;
                report.areas_created += 1;
            }

            for group in &area.item_groups {
                if !state.item_groups.contains_key(&group.id) {
                    state.insert_item_group(&NewItemGroup {
                        id: group.id.clone(),
                        area_id: area.id.clone(),
                        name: group.name.clone(),
                        description: group.description.clone(),
                        floor_plan: group.floor_plan.clone(),
                    })?;
                    report.item_groups_created += 1;
                }

                for item in &group.items {
                    if !state.items.contains_key(&item.id) {
                        state.insert_item(&NewItem {
                            id: item.id.clone(),
                            item_group_id: group.id.clone(),
                            name: item.name.clone(),
                            equipment: item.equipment.clone(),
                            warning: item.warning.clone(),
                        })?;
                        report.items_created += 1;
                    }
                }
            }
        }

        info!(
            areas_created = report.areas_created,
            item_groups_created = report.item_groups_created,
            items_created = report.items_created,
            "Inventory synchronized from declaration"
        );
        Ok(report)
    }

    async fn load_tree(&self) -> AppResult<InventoryTree> {
        let state = self.state.lock().await;
        Ok(InventoryTree::assemble(
            state.areas.values().cloned().collect(),
            state.item_groups.values().cloned().collect(),
            state.items.values().cloned().collect(),
        ))
    }
}
