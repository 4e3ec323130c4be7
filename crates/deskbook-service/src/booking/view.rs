//! Bookings enriched with inventory names.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use deskbook_entity::booking::Booking;
use deskbook_entity::inventory::ItemLocation;

/// A booking together with the names of the item, group, and area it
/// resolves to in the current snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingView {
    pub id: Uuid,
    pub item_id: String,
    pub item_name: String,
    pub item_group_id: String,
    pub item_group_name: String,
    pub area_id: String,
    pub area_name: String,
    pub user_id: String,
    pub booked_by_user_id: String,
    pub booking_date: NaiveDate,
    pub is_guest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    /// `false` when someone else made the booking for the beneficiary.
    pub booked_for_self: bool,
    pub created_at: DateTime<Utc>,
}

impl BookingView {
    pub fn new(booking: Booking, location: ItemLocation<'_>) -> Self {
        Self {
            booked_for_self: booking.user_id == booking.booked_by_user_id,
            id: booking.id,
            item_id: booking.item_id,
            item_name: location.item.name.clone(),
            item_group_id: location.item_group.id.clone(),
            item_group_name: location.item_group.name.clone(),
            area_id: location.area.id.clone(),
            area_name: location.area.name.clone(),
            user_id: booking.user_id,
            booked_by_user_id: booking.booked_by_user_id,
            booking_date: booking.booking_date,
            is_guest: booking.is_guest,
            guest_name: booking.guest_name,
            guest_email: booking.guest_email,
            created_at: booking.created_at,
        }
    }
}
