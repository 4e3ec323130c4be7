//! Service fixture wired to the in-memory backends.

use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate};

use deskbook_core::types::{format_date, today};
use deskbook_database::{MemoryInventoryStore, MemoryReservationLedger};
use deskbook_entity::inventory::{Area, InventoryTree, Item, ItemGroup};
use deskbook_service::{
    AvailabilityService, BookingService, InventoryService, InventorySnapshotHolder,
};

pub struct Fixture {
    pub inventory: InventoryService,
    pub bookings: BookingService,
    pub availability: AvailabilityService,
    /// Direct ledger access for arranging bookings on past dates.
    pub ledger: Arc<MemoryReservationLedger>,
}

fn item(id: &str, name: &str) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        equipment: vec![],
        warning: None,
    }
}

/// area-1 / ig-1 / {item-1, item-2}, area-2 / ig-2 / {item-3}.
pub fn declaration() -> InventoryTree {
    InventoryTree {
        areas: vec![
            Area {
                id: "area-1".to_string(),
                name: "Floor 1".to_string(),
                description: None,
                floor_plan: None,
                item_groups: vec![ItemGroup {
                    id: "ig-1".to_string(),
                    name: "Room 1".to_string(),
                    description: None,
                    floor_plan: None,
                    items: vec![item("item-1", "Desk 1"), item("item-2", "Desk 2")],
                }],
            },
            Area {
                id: "area-2".to_string(),
                name: "Floor 2".to_string(),
                description: None,
                floor_plan: None,
                item_groups: vec![ItemGroup {
                    id: "ig-2".to_string(),
                    name: "Room 2".to_string(),
                    description: None,
                    floor_plan: None,
                    items: vec![item("item-3", "Desk 3")],
                }],
            },
        ],
    }
}

pub async fn fixture() -> Fixture {
    let store = Arc::new(MemoryInventoryStore::new());
    let ledger = Arc::new(MemoryReservationLedger::new());
    let holder = Arc::new(InventorySnapshotHolder::new());

    let inventory = InventoryService::new(store, Arc::clone(&holder));
    inventory
        .sync_from_declaration(&declaration())
        .await
        .expect("seeding should succeed");

    Fixture {
        inventory,
        bookings: BookingService::new(ledger.clone(), holder.clone()),
        availability: AvailabilityService::new(ledger.clone(), holder),
        ledger,
    }
}

pub fn days_from_today(offset: i64) -> NaiveDate {
    let today = today();
    if offset >= 0 {
        today.checked_add_days(Days::new(offset as u64)).unwrap()
    } else {
        today.checked_sub_days(Days::new(offset.unsigned_abs())).unwrap()
    }
}

pub fn date_str(offset: i64) -> String {
    format_date(days_from_today(offset))
}

/// Monday of next week and its `YYYY-Www` token.
pub fn next_week() -> (NaiveDate, String) {
    let today = today();
    let monday = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
        .and_then(|m| m.checked_add_days(Days::new(7)))
        .unwrap();
    let iso = monday.iso_week();
    (monday, format!("{}-W{:02}", iso.year(), iso.week()))
}
