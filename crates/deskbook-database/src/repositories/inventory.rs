//! PostgreSQL inventory store.
//!
//! Uniqueness and parent/child rules are enforced by the schema; errors are
//! classified by constraint name.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use validator::Validate;

use deskbook_core::AppResult;
use deskbook_core::error::{AppError, ErrorKind};
use deskbook_entity::inventory::{
    AreaChanges, AreaRecord, InventoryTree, ItemChanges, ItemGroupChanges, ItemGroupRecord,
    ItemRecord, NewArea, NewItem, NewItemGroup, SyncReport,
};

use crate::traits::{InventoryStore, require_id};

const AREAS_PKEY: &str = "areas_pkey";
const ITEM_GROUPS_PKEY: &str = "item_groups_pkey";
const ITEMS_PKEY: &str = "items_pkey";
const ITEM_GROUPS_AREA_FKEY: &str = "item_groups_area_id_fkey";
const ITEMS_ITEM_GROUP_FKEY: &str = "items_item_group_id_fkey";

/// Inventory store backed by the `areas`, `item_groups`, and `items` tables.
#[derive(Debug, Clone)]
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn create_area(&self, input: &NewArea) -> AppResult<AreaRecord> {
        input.validate()?;

        sqlx::query_as::<_, AreaRecord>(
            "INSERT INTO areas (id, name, description, floor_plan) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&input.id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.floor_plan)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(AREAS_PKEY) => {
                AppError::conflict(format!("Area '{}' already exists", input.id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create area", e),
        })
    }

    async fn update_area(&self, id: &str, changes: &AreaChanges) -> AppResult<AreaRecord> {
        require_id("id", id)?;
        changes.validate()?;

        sqlx::query_as::<_, AreaRecord>(
            "UPDATE areas SET name = $2, description = $3, floor_plan = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.floor_plan)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update area", e))?
        .ok_or_else(|| AppError::not_found(format!("Area '{id}' not found")))
    }

    async fn delete_area(&self, id: &str) -> AppResult<()> {
        require_id("id", id)?;

        let result = sqlx::query("DELETE FROM areas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some(ITEM_GROUPS_AREA_FKEY) =>
                {
                    AppError::conflict(format!("Area '{id}' still contains item groups"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to delete area", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Area '{id}' not found")));
        }
        Ok(())
    }

    async fn get_area(&self, id: &str) -> AppResult<AreaRecord> {
        sqlx::query_as::<_, AreaRecord>("SELECT * FROM areas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find area", e))?
            .ok_or_else(|| AppError::not_found(format!("Area '{id}' not found")))
    }

    async fn create_item_group(&self, input: &NewItemGroup) -> AppResult<ItemGroupRecord> {
        input.validate()?;

        sqlx::query_as::<_, ItemGroupRecord>(
            "INSERT INTO item_groups (id, area_id, name, description, floor_plan) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&input.id)
        .bind(&input.area_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.floor_plan)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(ITEM_GROUPS_PKEY) => {
                AppError::conflict(format!("Item group '{}' already exists", input.id))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(ITEM_GROUPS_AREA_FKEY) =>
            {
                AppError::not_found(format!("Area '{}' not found", input.area_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create item group", e),
        })
    }

    async fn update_item_group(
        &self,
        id: &str,
        changes: &ItemGroupChanges,
    ) -> AppResult<ItemGroupRecord> {
        require_id("id", id)?;
        changes.validate()?;

        sqlx::query_as::<_, ItemGroupRecord>(
            "UPDATE item_groups SET name = $2, description = $3, floor_plan = $4, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.floor_plan)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update item group", e))?
        .ok_or_else(|| AppError::not_found(format!("Item group '{id}' not found")))
    }

    async fn delete_item_group(&self, id: &str) -> AppResult<()> {
        require_id("id", id)?;

        let result = sqlx::query("DELETE FROM item_groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some(ITEMS_ITEM_GROUP_FKEY) =>
                {
                    AppError::conflict(format!("Item group '{id}' still contains items"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to delete item group", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Item group '{id}' not found")));
        }
        Ok(())
    }

    async fn get_item_group(&self, id: &str) -> AppResult<ItemGroupRecord> {
        sqlx::query_as::<_, ItemGroupRecord>("SELECT * FROM item_groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find item group", e)
            })?
            .ok_or_else(|| AppError::not_found(format!("Item group '{id}' not found")))
    }

    async fn create_item(&self, input: &NewItem) -> AppResult<ItemRecord> {
        input.validate()?;

        sqlx::query_as::<_, ItemRecord>(
            "INSERT INTO items (id, item_group_id, name, equipment, warning) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&input.id)
        .bind(&input.item_group_id)
        .bind(&input.name)
        .bind(&input.equipment)
        .bind(&input.warning)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(ITEMS_PKEY) => {
                AppError::conflict(format!("Item '{}' already exists", input.id))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(ITEMS_ITEM_GROUP_FKEY) =>
            {
                AppError::not_found(format!("Item group '{}' not found", input.item_group_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create item", e),
        })
    }

    async fn update_item(&self, id: &str, changes: &ItemChanges) -> AppResult<ItemRecord> {
        require_id("id", id)?;
        changes.validate()?;

        sqlx::query_as::<_, ItemRecord>(
            "UPDATE items SET name = $2, equipment = $3, warning = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.equipment)
        .bind(&changes.warning)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update item", e))?
        .ok_or_else(|| AppError::not_found(format!("Item '{id}' not found")))
    }

    async fn delete_item(&self, id: &str) -> AppResult<()> {
        require_id("id", id)?;

        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete item", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Item '{id}' not found")));
        }
        Ok(())
    }

    async fn get_item(&self, id: &str) -> AppResult<ItemRecord> {
        sqlx::query_as::<_, ItemRecord>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find item", e))?
            .ok_or_else(|| AppError::not_found(format!("Item '{id}' not found")))
    }

    async fn sync_from_declaration(&self, tree: &InventoryTree) -> AppResult<SyncReport> {
        tree.check()?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin sync transaction", e)
        })?;
        let mut report = SyncReport::default();

        for area in &tree.areas {
            let created = sqlx::query(
                "INSERT INTO areas (id, name, description, floor_plan) \
                 VALUES ($1, $2, $3, $4) ON CONFLICT (id) DO NOTHING",
            )
            .bind(&area.id)
            .bind(&area.name)
            .bind(&area.description)
            .bind(&area.floor_plan)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to sync area", e))?
            .rows_affected();
            report.areas_created += created as usize;

            for group in &area.item_groups {
                let created = sqlx::query(
                    "INSERT INTO item_groups (id, area_id, name, description, floor_plan) \
                     VALUES ($1, $2, $3, $4, $5) ON CONFLICT (id) DO NOTHING",
                )
                .bind(&group.id)
                .bind(&area.id)
                .bind(&group.name)
                .bind(&group.description)
                .bind(&group.floor_plan)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to sync item group", e)
                })?
                .rows_affected();
                report.item_groups_created += created as usize;

                for item in &group.items {
                    let created = sqlx::query(
                        "INSERT INTO items (id, item_group_id, name, equipment, warning) \
                         VALUES ($1, $2, $3, $4, $5) ON CONFLICT (id) DO NOTHING",
                    )
                    .bind(&item.id)
                    .bind(&group.id)
                    .bind(&item.name)
                    .bind(&item.equipment)
                    .bind(&item.warning)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to sync item", e)
                    })?
                    .rows_affected();
                    report.items_created += created as usize;
                }
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit sync transaction", e)
        })?;

        info!(
            areas_created = report.areas_created,
            item_groups_created = report.item_groups_created,
            items_created = report.items_created,
            "Inventory synchronized from declaration"
        );
        Ok(report)
    }

    async fn load_tree(&self) -> AppResult<InventoryTree> {
        // All three tables are read from one snapshot.
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin load transaction", e)
        })?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to set load isolation", e)
            })?;

        let areas = sqlx::query_as::<_, AreaRecord>("SELECT * FROM areas ORDER BY name, id")
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load areas", e))?;

        let item_groups =
            sqlx::query_as::<_, ItemGroupRecord>("SELECT * FROM item_groups ORDER BY name, id")
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to load item groups", e)
                })?;

        let items = sqlx::query_as::<_, ItemRecord>("SELECT * FROM items ORDER BY name, id")
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load items", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit load transaction", e)
        })?;

        debug!(
            areas = areas.len(),
            item_groups = item_groups.len(),
            items = items.len(),
            "Loaded inventory rows"
        );
        Ok(InventoryTree::assemble(areas, item_groups, items))
    }
}
