//! Booking creation, cancellation, and listings.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use deskbook_core::error::AppError;
use deskbook_core::types::parse_optional_date;
use deskbook_entity::booking::Booking;
use deskbook_service::booking::{BookingView, CreateBookingRequest};

use crate::dto::request::{HistoryQuery, ListBookingsQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Booking>>)> {
    let booking = state.booking_service.create_booking(&auth, &req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking))))
}

/// GET /api/bookings?from=YYYY-MM-DD
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListBookingsQuery>,
) -> ApiResult<Json<ApiResponse<Vec<BookingView>>>> {
    let from = parse_optional_date("from", query.from.as_deref())?;
    let bookings = state
        .booking_service
        .list_user_bookings(&auth, from)
        .await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// GET /api/bookings/history?from=&to=
pub async fn list_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<ApiResponse<Vec<BookingView>>>> {
    let bookings = state
        .booking_service
        .list_booking_history(&auth, query.from.as_deref(), query.to.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// DELETE /api/bookings/{id}
///
/// An id that is not a UUID cannot name a booking and answers 404.
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::not_found("Booking not found"))?;
    state.booking_service.cancel_booking(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
