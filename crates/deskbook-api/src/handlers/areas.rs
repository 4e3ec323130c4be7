//! Area read surface, availability, and presence.

use axum::Json;
use axum::extract::{Path, Query, State};

use deskbook_entity::inventory::Area;
use deskbook_service::availability::{ItemGroupAvailability, PresenceEntry};
use deskbook_service::inventory::{AreaSummary, ItemGroupSummary};

use crate::dto::request::{AvailabilityQuery, DateQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/areas
pub async fn list_areas(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Json<ApiResponse<Vec<AreaSummary>>> {
    Json(ApiResponse::ok(state.inventory_service.list_areas()))
}

/// GET /api/areas/{id}
pub async fn get_area(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Area>>> {
    let area = state.inventory_service.get_area(&id)?;
    Ok(Json(ApiResponse::ok(area)))
}

/// GET /api/areas/{id}/item-groups
pub async fn list_item_groups(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<ItemGroupSummary>>>> {
    let groups = state.inventory_service.list_item_groups(&id)?;
    Ok(Json(ApiResponse::ok(groups)))
}

/// GET /api/areas/{id}/availability?week=2026-W12&days=5
pub async fn get_availability(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<Json<ApiResponse<Vec<ItemGroupAvailability>>>> {
    let availability = state
        .availability_service
        .get_availability(&id, &query.week, query.days)
        .await?;
    Ok(Json(ApiResponse::ok(availability)))
}

/// GET /api/areas/{id}/presence?date=YYYY-MM-DD
pub async fn get_presence(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<ApiResponse<Vec<PresenceEntry>>>> {
    let presence = state
        .availability_service
        .get_area_presence(&id, query.date.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(presence)))
}
