//! Shared application state passed to all handlers via Axum's `State` extractor.

use std::sync::Arc;

use deskbook_core::config::AppConfig;
use deskbook_database::{DatabasePool, InventoryStore, ReservationLedger};
use deskbook_service::{
    AvailabilityService, BookingService, InventoryService, InventorySnapshotHolder,
    SnapshotProvider,
};

/// Central application state shared across all request handlers.
///
/// Every field is cheaply cloneable (wrapped in `Arc`).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Inventory administration and read surface.
    pub inventory_service: Arc<InventoryService>,
    /// Booking conflict engine and listings.
    pub booking_service: Arc<BookingService>,
    /// Availability, presence, and item status.
    pub availability_service: Arc<AvailabilityService>,
    /// PostgreSQL pool, checked by the health endpoint. `None` in memory mode.
    pub database: Option<DatabasePool>,
}

impl AppState {
    /// Wires the services over the given backends. All services share the
    /// same snapshot holder.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn InventoryStore>,
        ledger: Arc<dyn ReservationLedger>,
        holder: Arc<InventorySnapshotHolder>,
    ) -> Self {
        let snapshots: Arc<dyn SnapshotProvider> = holder.clone();

        Self {
            config: Arc::new(config),
            inventory_service: Arc::new(InventoryService::new(store, holder)),
            booking_service: Arc::new(BookingService::new(
                Arc::clone(&ledger),
                Arc::clone(&snapshots),
            )),
            availability_service: Arc::new(AvailabilityService::new(ledger, snapshots)),
            database: None,
        }
    }

    /// Attach the pool the PostgreSQL backends run on.
    pub fn with_database(mut self, pool: DatabasePool) -> Self {
        self.database = Some(pool);
        self
    }
}
