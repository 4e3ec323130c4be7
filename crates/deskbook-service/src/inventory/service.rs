//! Inventory administration and the snapshot-backed read surface.
//!
//! Every successful admin write is followed by a snapshot reload, so the
//! next reader sees the change. Concurrent admin writes are not serialized
//! here; the store's per-statement atomicity decides between them.

use std::sync::Arc;

use tracing::info;

use deskbook_core::{AppError, AppResult};
use deskbook_database::InventoryStore;
use deskbook_entity::inventory::{
    Area, AreaChanges, AreaRecord, InventorySnapshot, InventoryTree, Item, ItemChanges,
    ItemGroupChanges, ItemGroupRecord, ItemRecord, NewArea, NewItem, NewItemGroup, SyncReport,
};

use super::holder::{InventorySnapshotHolder, SnapshotProvider};
use super::view::{AreaSummary, ItemGroupSummary, SnapshotSummary};
use crate::context::RequestContext;

/// Manages the inventory and keeps the snapshot in step with the store.
#[derive(Debug, Clone)]
pub struct InventoryService {
    /// System of record.
    store: Arc<dyn InventoryStore>,
    /// Current snapshot.
    holder: Arc<InventorySnapshotHolder>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn InventoryStore>, holder: Arc<InventorySnapshotHolder>) -> Self {
        Self { store, holder }
    }

    /// Seed the store from a declaration, then reload the snapshot.
    pub async fn sync_from_declaration(&self, tree: &InventoryTree) -> AppResult<SyncReport> {
        let report = self.store.sync_from_declaration(tree).await?;
        self.reload().await?;
        Ok(report)
    }

    /// Rebuild the snapshot from the store.
    pub async fn reload(&self) -> AppResult<Arc<InventorySnapshot>> {
        self.holder.reload(self.store.as_ref()).await
    }

    /// Admin-triggered reload.
    pub async fn reload_snapshot(&self, ctx: &RequestContext) -> AppResult<SnapshotSummary> {
        ctx.require_admin()?;
        let snapshot = self.reload().await?;
        info!(user_id = %ctx.user_id, version = snapshot.version(), "Snapshot reload requested");
        Ok(SnapshotSummary::from(snapshot.as_ref()))
    }

    // ── Areas ─────────────────────────────────────────────────────

    pub async fn create_area(&self, ctx: &RequestContext, input: &NewArea) -> AppResult<AreaRecord> {
        ctx.require_admin()?;
        let area = self.store.create_area(input).await?;
        info!(user_id = %ctx.user_id, area_id = %area.id, "Area created");
        self.reload().await?;
        Ok(area)
    }

    pub async fn update_area(
        &self,
        ctx: &RequestContext,
        id: &str,
        changes: &AreaChanges,
    ) -> AppResult<AreaRecord> {
        ctx.require_admin()?;
        let area = self.store.update_area(id, changes).await?;
        info!(user_id = %ctx.user_id, area_id = %id, "Area updated");
        self.reload().await?;
        Ok(area)
    }

    pub async fn delete_area(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        ctx.require_admin()?;
        self.store.delete_area(id).await?;
        info!(user_id = %ctx.user_id, area_id = %id, "Area deleted");
        self.reload().await?;
        Ok(())
    }

    // ── Item groups ───────────────────────────────────────────────

    pub async fn create_item_group(
        &self,
        ctx: &RequestContext,
        input: &NewItemGroup,
    ) -> AppResult<ItemGroupRecord> {
        ctx.require_admin()?;
        let group = self.store.create_item_group(input).await?;
        info!(
            user_id = %ctx.user_id,
            item_group_id = %group.id,
            area_id = %group.area_id,
            "Item group created"
        );
        self.reload().await?;
        Ok(group)
    }

    pub async fn update_item_group(
        &self,
        ctx: &RequestContext,
        id: &str,
        changes: &ItemGroupChanges,
    ) -> AppResult<ItemGroupRecord> {
        ctx.require_admin()?;
        let group = self.store.update_item_group(id, changes).await?;
        info!(user_id = %ctx.user_id, item_group_id = %id, "Item group updated");
        self.reload().await?;
        Ok(group)
    }

    pub async fn delete_item_group(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        ctx.require_admin()?;
        self.store.delete_item_group(id).await?;
        info!(user_id = %ctx.user_id, item_group_id = %id, "Item group deleted");
        self.reload().await?;
        Ok(())
    }

    // ── Items ─────────────────────────────────────────────────────

    pub async fn create_item(&self, ctx: &RequestContext, input: &NewItem) -> AppResult<ItemRecord> {
        ctx.require_admin()?;
        let item = self.store.create_item(input).await?;
        info!(
            user_id = %ctx.user_id,
            item_id = %item.id,
            item_group_id = %item.item_group_id,
            "Item created"
        );
        self.reload().await?;
        Ok(item)
    }

    pub async fn update_item(
        &self,
        ctx: &RequestContext,
        id: &str,
        changes: &ItemChanges,
    ) -> AppResult<ItemRecord> {
        ctx.require_admin()?;
        let item = self.store.update_item(id, changes).await?;
        info!(user_id = %ctx.user_id, item_id = %id, "Item updated");
        self.reload().await?;
        Ok(item)
    }

    pub async fn delete_item(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        ctx.require_admin()?;
        self.store.delete_item(id).await?;
        info!(user_id = %ctx.user_id, item_id = %id, "Item deleted");
        self.reload().await?;
        Ok(())
    }

    // ── Read surface ──────────────────────────────────────────────

    /// Version and size of the snapshot currently served.
    pub fn snapshot_summary(&self) -> SnapshotSummary {
        SnapshotSummary::from(self.holder.current().as_ref())
    }

    pub fn list_areas(&self) -> Vec<AreaSummary> {
        self.holder
            .current()
            .areas()
            .iter()
            .map(AreaSummary::from)
            .collect()
    }

    /// The full subtree of one area.
    pub fn get_area(&self, id: &str) -> AppResult<Area> {
        self.holder
            .current()
            .find_area(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Area not found"))
    }

    pub fn list_item_groups(&self, area_id: &str) -> AppResult<Vec<ItemGroupSummary>> {
        let snapshot = self.holder.current();
        let area = snapshot
            .find_area(area_id)
            .ok_or_else(|| AppError::not_found("Area not found"))?;
        Ok(area
            .item_groups
            .iter()
            .map(|g| ItemGroupSummary::new(&area.id, g))
            .collect())
    }

    pub fn list_items(&self, item_group_id: &str) -> AppResult<Vec<Item>> {
        self.holder
            .current()
            .find_item_group(item_group_id)
            .map(|(_, group)| group.items.clone())
            .ok_or_else(|| AppError::not_found("Item group not found"))
    }
}
