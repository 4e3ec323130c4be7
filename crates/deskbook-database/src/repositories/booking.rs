//! PostgreSQL reservation ledger.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use deskbook_core::AppResult;
use deskbook_core::error::{AppError, ErrorKind};
use deskbook_entity::booking::{Booking, BookingCounts, NewBooking};

use crate::traits::ReservationLedger;

/// The unique constraint on `(item_id, booking_date)`.
pub const BOOKING_SLOT_CONSTRAINT: &str = "bookings_item_id_booking_date_key";

/// Reservation ledger backed by the `bookings` table.
#[derive(Debug, Clone)]
pub struct PgReservationLedger {
    pool: PgPool,
}

impl PgReservationLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationLedger for PgReservationLedger {
    async fn find_by_item_user_date(
        &self,
        item_id: &str,
        user_id: &str,
        date: NaiveDate,
    ) -> AppResult<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM bookings WHERE item_id = $1 AND user_id = $2 AND booking_date = $3",
        )
        .bind(item_id)
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check existing booking", e)
        })
    }

    async fn create(&self, booking: &NewBooking) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, item_id, user_id, booking_date, is_guest, guest_name, \
             guest_email, booked_by_user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&booking.item_id)
        .bind(&booking.user_id)
        .bind(booking.booking_date)
        .bind(booking.is_guest)
        .bind(&booking.guest_name)
        .bind(&booking.guest_email)
        .bind(&booking.booked_by_user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(BOOKING_SLOT_CONSTRAINT) =>
            {
                AppError::conflict("Item is already booked for this date")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create booking", e),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete booking", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Booking {id} not found")));
        }
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings \
             WHERE (user_id = $1 OR booked_by_user_id = $1) \
               AND booking_date >= $2 \
               AND ($3::date IS NULL OR booking_date <= $3) \
             ORDER BY booking_date ASC, created_at ASC",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))
    }

    async fn count_per_item_per_date(
        &self,
        item_ids: &[String],
        dates: &[NaiveDate],
    ) -> AppResult<BookingCounts> {
        if item_ids.is_empty() || dates.is_empty() {
            return Ok(BookingCounts::new());
        }

        let rows = sqlx::query_as::<_, (String, NaiveDate, i64)>(
            "SELECT item_id, booking_date, COUNT(*) FROM bookings \
             WHERE item_id = ANY($1) AND booking_date = ANY($2) \
             GROUP BY item_id, booking_date",
        )
        .bind(item_ids)
        .bind(dates)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;

        debug!(
            items = item_ids.len(),
            dates = dates.len(),
            groups = rows.len(),
            "Counted bookings per item and date"
        );
        Ok(rows
            .into_iter()
            .map(|(item_id, date, count)| ((item_id, date), count))
            .collect())
    }

    async fn list_for_items_on_date(
        &self,
        item_ids: &[String],
        date: NaiveDate,
    ) -> AppResult<Vec<Booking>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE item_id = ANY($1) AND booking_date = $2 \
             ORDER BY created_at ASC",
        )
        .bind(item_ids)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list bookings for date", e)
        })
    }
}
