//! Storage contracts shared by every backend.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use deskbook_core::{AppError, AppResult};
use deskbook_entity::booking::{Booking, BookingCounts, NewBooking};
use deskbook_entity::inventory::{
    AreaChanges, AreaRecord, InventoryTree, ItemChanges, ItemGroupChanges, ItemGroupRecord,
    ItemRecord, NewArea, NewItem, NewItemGroup, SyncReport,
};

/// Durable CRUD over the Area → ItemGroup → Item hierarchy.
///
/// Implementations must reject a colliding id with `ErrorKind::Conflict`,
/// a missing parent with `ErrorKind::NotFound`, and the deletion of a node
/// that still owns children with `ErrorKind::Conflict`.
#[async_trait]
pub trait InventoryStore: Send + Sync + std::fmt::Debug {
    async fn create_area(&self, input: &NewArea) -> AppResult<AreaRecord>;
    async fn update_area(&self, id: &str, changes: &AreaChanges) -> AppResult<AreaRecord>;
    async fn delete_area(&self, id: &str) -> AppResult<()>;
    async fn get_area(&self, id: &str) -> AppResult<AreaRecord>;

    async fn create_item_group(&self, input: &NewItemGroup) -> AppResult<ItemGroupRecord>;
    async fn update_item_group(
        &self,
        id: &str,
        changes: &ItemGroupChanges,
    ) -> AppResult<ItemGroupRecord>;
    async fn delete_item_group(&self, id: &str) -> AppResult<()>;
    async fn get_item_group(&self, id: &str) -> AppResult<ItemGroupRecord>;

    async fn create_item(&self, input: &NewItem) -> AppResult<ItemRecord>;
    async fn update_item(&self, id: &str, changes: &ItemChanges) -> AppResult<ItemRecord>;
    async fn delete_item(&self, id: &str) -> AppResult<()>;
    async fn get_item(&self, id: &str) -> AppResult<ItemRecord>;

    /// Create every declared node whose id is not stored yet. Existing nodes
    /// are never modified or removed.
    async fn sync_from_declaration(&self, tree: &InventoryTree) -> AppResult<SyncReport>;

    /// Rebuild the full tree, ordered by name then id at each level, from a
    /// single consistent read of all three levels.
    async fn load_tree(&self) -> AppResult<InventoryTree>;
}

/// Durable storage of bookings with at most one booking per item and date.
#[async_trait]
pub trait ReservationLedger: Send + Sync + std::fmt::Debug {
    /// Advisory lookup of an existing booking for the same item, user, and date.
    async fn find_by_item_user_date(
        &self,
        item_id: &str,
        user_id: &str,
        date: NaiveDate,
    ) -> AppResult<Option<Uuid>>;

    /// Insert a booking. A second booking for the same item and date fails
    /// with `ErrorKind::Conflict`.
    async fn create(&self, booking: &NewBooking) -> AppResult<Booking>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Bookings the user owns or made, from `from` (inclusive) up to `to`
    /// (inclusive, unbounded when `None`), ordered by date then creation time.
    async fn list_for_user(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<Booking>>;

    /// Booking counts grouped by item and date. Empty inputs yield an empty
    /// map without touching storage.
    async fn count_per_item_per_date(
        &self,
        item_ids: &[String],
        dates: &[NaiveDate],
    ) -> AppResult<BookingCounts>;

    /// Every booking on `date` for any of `item_ids`.
    async fn list_for_items_on_date(
        &self,
        item_ids: &[String],
        date: NaiveDate,
    ) -> AppResult<Vec<Booking>>;
}

/// Reject an empty identifier before it reaches storage.
pub(crate) fn require_id(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}
