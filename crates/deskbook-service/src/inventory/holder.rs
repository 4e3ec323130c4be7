//! The current inventory snapshot, shared by every request.
//!
//! Readers clone an `Arc` under a read guard held only for the pointer
//! copy. A reload reserves its version number, fetches the tree from the
//! store, and takes the write guard only to swap the pointer, so readers
//! never wait on storage.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use deskbook_core::AppResult;
use deskbook_database::InventoryStore;
use deskbook_entity::inventory::InventorySnapshot;

/// Read access to the current inventory snapshot.
pub trait SnapshotProvider: Send + Sync + std::fmt::Debug {
    /// The snapshot that is current right now. Never blocks on storage.
    fn current(&self) -> Arc<InventorySnapshot>;
}

/// Atomically swappable holder of the current [`InventorySnapshot`].
#[derive(Debug)]
pub struct InventorySnapshotHolder {
    current: RwLock<Arc<InventorySnapshot>>,
    next_version: AtomicU64,
}

impl Default for InventorySnapshotHolder {
    fn default() -> Self {
        Self::new()
    }
}

impl InventorySnapshotHolder {
    /// Start with an empty version-0 snapshot.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(InventorySnapshot::empty())),
            next_version: AtomicU64::new(1),
        }
    }

    /// Replace the current snapshot with a fresh load from `store`.
    ///
    /// On failure the previous snapshot stays current. The version is
    /// reserved before the fetch starts, so when two reloads race the one
    /// that started reading last wins and an older read never replaces a
    /// newer one.
    pub async fn reload(&self, store: &dyn InventoryStore) -> AppResult<Arc<InventorySnapshot>> {
        let version = self.next_version.fetch_add(1, Ordering::SeqCst);
        let tree = store.load_tree().await?;
        let snapshot = Arc::new(InventorySnapshot::new(version, tree));

        {
            let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
            if current.version() > version {
                debug!(
                    discarded = version,
                    current = current.version(),
                    "Discarding stale inventory snapshot"
                );
                return Ok(Arc::clone(&current));
            }
            *current = Arc::clone(&snapshot);
        }

        let (areas, item_groups, items) = snapshot.counts();
        info!(
            version,
            areas, item_groups, items, "Inventory snapshot reloaded"
        );
        Ok(snapshot)
    }
}

impl SnapshotProvider for InventorySnapshotHolder {
    fn current(&self) -> Arc<InventorySnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(|e| e.into_inner()))
    }
}
