//! Booking entity model.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Booked-item counts keyed by `(item_id, booking_date)`.
pub type BookingCounts = HashMap<(String, NaiveDate), i64>;

/// One reservation of one item for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The reserved item.
    pub item_id: String,
    /// The beneficiary; a generated `guest-` id for guest bookings.
    pub user_id: String,
    /// The reserved day.
    pub booking_date: NaiveDate,
    /// Whether the beneficiary is an unauthenticated guest.
    pub is_guest: bool,
    /// Guest display name.
    pub guest_name: Option<String>,
    /// Guest contact email.
    pub guest_email: Option<String>,
    /// The user who made the reservation.
    pub booked_by_user_id: String,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Whether `user_id` owns or made this booking.
    pub fn involves(&self, user_id: &str) -> bool {
        self.user_id == user_id || self.booked_by_user_id == user_id
    }
}

/// Data required to insert a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub item_id: String,
    pub user_id: String,
    pub booked_by_user_id: String,
    pub booking_date: NaiveDate,
    pub is_guest: bool,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
}

impl NewBooking {
    /// A user booking for themselves.
    pub fn personal(item_id: impl Into<String>, user_id: impl Into<String>, date: NaiveDate) -> Self {
        let user_id = user_id.into();
        Self {
            item_id: item_id.into(),
            booked_by_user_id: user_id.clone(),
            user_id,
            booking_date: date,
            is_guest: false,
            guest_name: None,
            guest_email: None,
        }
    }

    /// A booking made by `booker` for another registered user.
    pub fn on_behalf(
        item_id: impl Into<String>,
        user_id: impl Into<String>,
        booker: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            user_id: user_id.into(),
            booked_by_user_id: booker.into(),
            booking_date: date,
            is_guest: false,
            guest_name: None,
            guest_email: None,
        }
    }

    /// A booking made by `booker` for an unauthenticated guest. The guest is
    /// assigned a fresh `guest-xxxxxxxx` user id.
    pub fn guest(
        item_id: impl Into<String>,
        guest_name: impl Into<String>,
        guest_email: Option<String>,
        booker: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let simple = Uuid::new_v4().simple().to_string();
        Self {
            item_id: item_id.into(),
            user_id: format!("guest-{}", &simple[..8]),
            booked_by_user_id: booker.into(),
            booking_date: date,
            is_guest: true,
            guest_name: Some(guest_name.into()),
            guest_email,
        }
    }

    /// Whether the booker differs from the beneficiary.
    pub fn is_on_behalf(&self) -> bool {
        self.user_id != self.booked_by_user_id
    }
}
