//! In-memory reservation ledger.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use deskbook_core::{AppError, AppResult};
use deskbook_entity::booking::{Booking, BookingCounts, NewBooking};

use crate::traits::ReservationLedger;

#[derive(Debug, Default)]
struct InnerState {
    bookings: HashMap<Uuid, Booking>,
    /// Unique index over `(item_id, booking_date)`.
    slots: HashMap<(String, NaiveDate), Uuid>,
}

/// Reservation ledger held entirely in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryReservationLedger {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryReservationLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_by_date_then_created(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| {
        a.booking_date
            .cmp(&b.booking_date)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}

#[async_trait]
impl ReservationLedger for MemoryReservationLedger {
    async fn find_by_item_user_date(
        &self,
        item_id: &str,
        user_id: &str,
        date: NaiveDate,
    ) -> AppResult<Option<Uuid>> {
        let state = self.state.lock().await;
        Ok(state
            .slots
            .get(&(item_id.to_string(), date))
            .and_then(|id| state.bookings.get(id))
            .filter(|b| b.user_id == user_id)
            .map(|b| b.id))
    }

    async fn create(&self, booking: &NewBooking) -> AppResult<Booking> {
        let mut state = self.state.lock().await;

        let slot = (booking.item_id.clone(), booking.booking_date);
        if state.slots.contains_key(&slot) {
            return Err(AppError::conflict("Item is already booked for this date"));
        }

        let now = Utc::now();
        let stored = Booking {
            id: Uuid::new_v4(),
            item_id: booking.item_id.clone(),
            user_id: booking.user_id.clone(),
            booking_date: booking.booking_date,
            is_guest: booking.is_guest,
            guest_name: booking.guest_name.clone(),
            guest_email: booking.guest_email.clone(),
            booked_by_user_id: booking.booked_by_user_id.clone(),
            created_at: now,
            updated_at: now,
        };
        state.slots.insert(slot, stored.id);
        state.bookings.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        Ok(self.state.lock().await.bookings.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let removed = state
            .bookings
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
        state.slots.remove(&(removed.item_id, removed.booking_date));
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<Booking>> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| b.involves(user_id))
            .filter(|b| b.booking_date >= from && to.is_none_or(|to| b.booking_date <= to))
            .cloned()
            .collect();
        sort_by_date_then_created(&mut bookings);
        Ok(bookings)
    }

    async fn count_per_item_per_date(
        &self,
        item_ids: &[String],
        dates: &[NaiveDate],
    ) -> AppResult<BookingCounts> {
        let mut counts = BookingCounts::new();
        if item_ids.is_empty() || dates.is_empty() {
            return Ok(counts);
        }

        let state = self.state.lock().await;
        for booking in state.bookings.values() {
            if item_ids.contains(&booking.item_id) && dates.contains(&booking.booking_date) {
                *counts
                    .entry((booking.item_id.clone(), booking.booking_date))
                    .or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn list_for_items_on_date(
        &self,
        item_ids: &[String],
        date: NaiveDate,
    ) -> AppResult<Vec<Booking>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| b.booking_date == date && item_ids.contains(&b.item_id))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(bookings)
    }
}
