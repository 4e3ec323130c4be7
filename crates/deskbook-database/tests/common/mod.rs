//! Shared contract suite for storage backends.
//!
//! Every backend must pass these tests. Ids are randomized per test so the
//! suite can run against a shared, long-lived database.
//!
//! ```ignore
//! mod common;
//!
//! #[tokio::test]
//! async fn memory_passes_inventory_store_tests() {
//!     common::run_inventory_store_tests(&MemoryInventoryStore::new()).await;
//! }
//! ```

pub mod inventory_store_tests;
pub mod reservation_ledger_tests;

use deskbook_database::{InventoryStore, ReservationLedger};

/// Unique id with a readable prefix.
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}

pub async fn run_inventory_store_tests<S>(store: &S)
where
    S: InventoryStore + Clone + 'static,
{
    inventory_store_tests::run_all(store).await;
}

pub async fn run_reservation_ledger_tests<L>(ledger: &L)
where
    L: ReservationLedger + Clone + 'static,
{
    reservation_ledger_tests::run_all(ledger).await;
}
