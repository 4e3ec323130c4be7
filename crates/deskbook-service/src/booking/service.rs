//! Booking conflict engine.
//!
//! A booking is validated against the current snapshot and then inserted
//! into the ledger. The advisory pre-check and the insert are not atomic:
//! the ledger's uniqueness guarantee on `(item, date)` is the only arbiter,
//! and no application lock is taken.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use deskbook_core::types::{parse_booking_date, parse_optional_date, today};
use deskbook_core::{AppError, AppResult};
use deskbook_database::ReservationLedger;
use deskbook_entity::booking::{Booking, NewBooking};

use super::view::BookingView;
use crate::context::RequestContext;
use crate::inventory::SnapshotProvider;

const SLOT_TAKEN: &str = "Item is already booked for this date";
const HISTORY_DAYS: u64 = 30;

/// Request to book one item for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub item_id: String,
    /// `YYYY-MM-DD`.
    pub booking_date: String,
    /// Book on behalf of another registered user.
    #[serde(default)]
    pub for_user_id: Option<String>,
    /// Book for an unauthenticated guest.
    #[serde(default)]
    pub guest: Option<GuestDetails>,
}

impl CreateBookingRequest {
    pub fn new(item_id: impl Into<String>, booking_date: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            booking_date: booking_date.into(),
            for_user_id: None,
            guest: None,
        }
    }
}

/// Guest identity for a guest booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestDetails {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Creates, cancels, and lists bookings.
#[derive(Debug, Clone)]
pub struct BookingService {
    ledger: Arc<dyn ReservationLedger>,
    snapshots: Arc<dyn SnapshotProvider>,
}

impl BookingService {
    pub fn new(ledger: Arc<dyn ReservationLedger>, snapshots: Arc<dyn SnapshotProvider>) -> Self {
        Self { ledger, snapshots }
    }

    /// Book an item for a date.
    ///
    /// Fails with `Validation` for a malformed or past date, `NotFound` for
    /// an item absent from the current snapshot, and `Conflict` when the
    /// item is already booked that day.
    pub async fn create_booking(
        &self,
        ctx: &RequestContext,
        request: &CreateBookingRequest,
    ) -> AppResult<Booking> {
        let date = parse_booking_date("booking_date", &request.booking_date)?;
        if date < today() {
            return Err(AppError::validation("Booking date cannot be in the past"));
        }

        if !self.snapshots.current().contains_item(&request.item_id) {
            return Err(AppError::not_found("Item not found"));
        }

        let new_booking = self.beneficiary(ctx, request, date)?;

        if !new_booking.is_guest {
            let existing = self
                .ledger
                .find_by_item_user_date(&new_booking.item_id, &new_booking.user_id, date)
                .await?;
            if existing.is_some() {
                let message = if new_booking.is_on_behalf() {
                    "This user already has this item booked for this date"
                } else {
                    "You already have this item booked for this date"
                };
                return Err(AppError::conflict(message));
            }
        }

        let booking = match self.ledger.create(&new_booking).await {
            Ok(booking) => booking,
            Err(e) if e.is_conflict() => {
                warn!(
                    item_id = %new_booking.item_id,
                    user_id = %new_booking.user_id,
                    booking_date = %date,
                    "Booking rejected: slot already taken"
                );
                return Err(AppError::conflict(SLOT_TAKEN));
            }
            Err(e) => return Err(e),
        };

        info!(
            booking_id = %booking.id,
            item_id = %booking.item_id,
            user_id = %booking.user_id,
            booked_by = %booking.booked_by_user_id,
            booking_date = %booking.booking_date,
            is_guest = booking.is_guest,
            "Booking created"
        );
        Ok(booking)
    }

    /// Cancel a booking. Only its owner, the user who made it, or an admin
    /// may cancel; anyone else gets `NotFound`.
    pub async fn cancel_booking(&self, ctx: &RequestContext, booking_id: Uuid) -> AppResult<()> {
        let booking = self
            .ledger
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        if !booking.involves(&ctx.user_id) && !ctx.is_admin() {
            return Err(AppError::not_found("Booking not found"));
        }

        self.ledger.delete(booking_id).await?;
        info!(
            booking_id = %booking_id,
            item_id = %booking.item_id,
            cancelled_by = %ctx.user_id,
            "Booking cancelled"
        );
        Ok(())
    }

    /// Bookings the caller owns or made, from `from` (default today) onward.
    pub async fn list_user_bookings(
        &self,
        ctx: &RequestContext,
        from: Option<NaiveDate>,
    ) -> AppResult<Vec<BookingView>> {
        let from = from.unwrap_or_else(today);
        let bookings = self.ledger.list_for_user(&ctx.user_id, from, None).await?;
        Ok(self.enrich(bookings))
    }

    /// Past bookings in `[from, to]`, defaulting to the last thirty days up
    /// to yesterday.
    pub async fn list_booking_history(
        &self,
        ctx: &RequestContext,
        from: Option<&str>,
        to: Option<&str>,
    ) -> AppResult<Vec<BookingView>> {
        let today = today();
        let from = parse_optional_date("from", from)?
            .unwrap_or_else(|| today.checked_sub_days(Days::new(HISTORY_DAYS)).unwrap_or(today));
        let to = parse_optional_date("to", to)?
            .unwrap_or_else(|| today.pred_opt().unwrap_or(today));

        if from > to {
            return Err(AppError::validation("from must not be after to"));
        }

        let bookings = self
            .ledger
            .list_for_user(&ctx.user_id, from, Some(to))
            .await?;
        Ok(self.enrich(bookings))
    }

    fn beneficiary(
        &self,
        ctx: &RequestContext,
        request: &CreateBookingRequest,
        date: NaiveDate,
    ) -> AppResult<NewBooking> {
        let for_user = request
            .for_user_id
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty());

        match (&request.guest, for_user) {
            (Some(_), Some(_)) => Err(AppError::validation(
                "A booking is either for a guest or for another user, not both",
            )),
            (Some(guest), None) => {
                let name = guest.name.trim();
                if name.is_empty() {
                    return Err(AppError::validation("guest name is required"));
                }
                let email = guest
                    .email
                    .as_deref()
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .map(str::to_string);
                Ok(NewBooking::guest(
                    &request.item_id,
                    name,
                    email,
                    &ctx.user_id,
                    date,
                ))
            }
            (None, Some(user)) if user != ctx.user_id => Ok(NewBooking::on_behalf(
                &request.item_id,
                user,
                &ctx.user_id,
                date,
            )),
            (None, _) => Ok(NewBooking::personal(&request.item_id, &ctx.user_id, date)),
        }
    }

    /// Attach inventory names, skipping bookings whose item no longer
    /// resolves.
    fn enrich(&self, bookings: Vec<Booking>) -> Vec<BookingView> {
        let snapshot = self.snapshots.current();
        bookings
            .into_iter()
            .filter_map(|booking| match snapshot.find_item(&booking.item_id) {
                Some(location) => Some(BookingView::new(booking, location)),
                None => {
                    warn!(
                        booking_id = %booking.id,
                        item_id = %booking.item_id,
                        "Skipping booking for unknown item"
                    );
                    None
                }
            })
            .collect()
    }
}
