//! Read-only analytics over the ledger and the snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use deskbook_core::types::{parse_optional_date, today};
use deskbook_core::{AppError, AppResult};
use deskbook_database::ReservationLedger;
use deskbook_entity::booking::Booking;

use super::week::{parse_iso_week, week_dates, weekday_code};
use crate::context::RequestContext;
use crate::inventory::SnapshotProvider;

/// Occupancy of one item group on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    /// `MO` .. `SU`.
    pub weekday: String,
    pub total: usize,
    pub available: usize,
}

/// Daily occupancy of one item group across the requested week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGroupAvailability {
    pub item_group_id: String,
    pub item_group_name: String,
    pub days: Vec<DayAvailability>,
}

/// Someone booked into an area on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceEntry {
    pub booking_id: Uuid,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    pub item_id: String,
    pub item_name: String,
    pub item_group_id: String,
    pub item_group_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemAvailability {
    Available,
    Occupied,
}

/// One item of a group and whether it is free on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStatus {
    pub id: String,
    pub name: String,
    pub equipment: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub availability: ItemAvailability,
    /// Occupying booking; only disclosed to admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<Uuid>,
    /// Occupying user; only disclosed to admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booked_by: Option<String>,
}

/// Computes availability tables, presence lists, and item status.
#[derive(Debug, Clone)]
pub struct AvailabilityService {
    ledger: Arc<dyn ReservationLedger>,
    snapshots: Arc<dyn SnapshotProvider>,
}

impl AvailabilityService {
    pub fn new(ledger: Arc<dyn ReservationLedger>, snapshots: Arc<dyn SnapshotProvider>) -> Self {
        Self { ledger, snapshots }
    }

    /// Per-group `{total, available}` for each of `day_count` days of the
    /// ISO week `week` (empty for the current week).
    ///
    /// Issues exactly one grouped count query over every item of the area.
    pub async fn get_availability(
        &self,
        area_id: &str,
        week: &str,
        day_count: u32,
    ) -> AppResult<Vec<ItemGroupAvailability>> {
        let snapshot = self.snapshots.current();
        let area = snapshot
            .find_area(area_id)
            .ok_or_else(|| AppError::not_found("Area not found"))?;

        let monday = parse_iso_week(week)?;
        let dates = week_dates(monday, day_count)?;

        let item_ids = area.item_ids();
        let counts = self
            .ledger
            .count_per_item_per_date(&item_ids, &dates)
            .await?;
        debug!(
            area_id = %area_id,
            week_start = %monday,
            items = item_ids.len(),
            booked_slots = counts.len(),
            "Computed availability counts"
        );

        Ok(area
            .item_groups
            .iter()
            .map(|group| {
                let total = group.items.len();
                let days = dates
                    .iter()
                    .map(|&date| {
                        let booked = group
                            .items
                            .iter()
                            .filter(|item| {
                                counts
                                    .get(&(item.id.clone(), date))
                                    .is_some_and(|&n| n >= 1)
                            })
                            .count();
                        DayAvailability {
                            date,
                            weekday: weekday_code(date).to_string(),
                            total,
                            available: total.saturating_sub(booked),
                        }
                    })
                    .collect();
                ItemGroupAvailability {
                    item_group_id: group.id.clone(),
                    item_group_name: group.name.clone(),
                    days,
                }
            })
            .collect())
    }

    /// Everyone booked into the area on `date` (default today), ordered by
    /// item id.
    pub async fn get_area_presence(
        &self,
        area_id: &str,
        date: Option<&str>,
    ) -> AppResult<Vec<PresenceEntry>> {
        let snapshot = self.snapshots.current();
        let area = snapshot
            .find_area(area_id)
            .ok_or_else(|| AppError::not_found("Area not found"))?;
        let date = parse_optional_date("date", date)?.unwrap_or_else(today);

        let mut bookings = self
            .ledger
            .list_for_items_on_date(&area.item_ids(), date)
            .await?;
        bookings.sort_by(|a, b| a.item_id.cmp(&b.item_id));

        Ok(bookings
            .into_iter()
            .filter_map(|booking| {
                let location = snapshot.find_item(&booking.item_id)?;
                Some(PresenceEntry {
                    booking_id: booking.id,
                    item_name: location.item.name.clone(),
                    item_group_id: location.item_group.id.clone(),
                    item_group_name: location.item_group.name.clone(),
                    item_id: booking.item_id,
                    user_id: booking.user_id,
                    guest_name: booking.guest_name,
                })
            })
            .collect())
    }

    /// Every item of a group with its status on `date` (default today).
    pub async fn list_item_status(
        &self,
        ctx: &RequestContext,
        item_group_id: &str,
        date: Option<&str>,
    ) -> AppResult<Vec<ItemStatus>> {
        let snapshot = self.snapshots.current();
        let (_, group) = snapshot
            .find_item_group(item_group_id)
            .ok_or_else(|| AppError::not_found("Item group not found"))?;
        let date = parse_optional_date("date", date)?.unwrap_or_else(today);

        let item_ids: Vec<String> = group.items.iter().map(|i| i.id.clone()).collect();
        let occupied: HashMap<String, Booking> = self
            .ledger
            .list_for_items_on_date(&item_ids, date)
            .await?
            .into_iter()
            .map(|b| (b.item_id.clone(), b))
            .collect();

        let disclose = ctx.is_admin();
        Ok(group
            .items
            .iter()
            .map(|item| {
                let booking = occupied.get(&item.id);
                ItemStatus {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    equipment: item.equipment.clone(),
                    warning: item.warning.clone(),
                    availability: if booking.is_some() {
                        ItemAvailability::Occupied
                    } else {
                        ItemAvailability::Available
                    },
                    booking_id: booking.filter(|_| disclose).map(|b| b.id),
                    booked_by: booking.filter(|_| disclose).map(|b| b.user_id.clone()),
                }
            })
            .collect())
    }
}
