//! Area, item group, and item administration. Each successful write
//! reloads the snapshot before the response is sent.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use deskbook_entity::inventory::{
    AreaChanges, AreaRecord, ItemChanges, ItemGroupChanges, ItemGroupRecord, ItemRecord, NewArea,
    NewItem, NewItemGroup,
};

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::state::AppState;

/// POST /api/admin/areas
pub async fn create_area(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<NewArea>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AreaRecord>>)> {
    let area = state.inventory_service.create_area(&admin, &req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(area))))
}

/// PUT /api/admin/areas/{id}
pub async fn update_area(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<AreaChanges>,
) -> ApiResult<Json<ApiResponse<AreaRecord>>> {
    let area = state
        .inventory_service
        .update_area(&admin, &id, &req)
        .await?;
    Ok(Json(ApiResponse::ok(area)))
}

/// DELETE /api/admin/areas/{id}
pub async fn delete_area(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.inventory_service.delete_area(&admin, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/item-groups
pub async fn create_item_group(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<NewItemGroup>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ItemGroupRecord>>)> {
    let group = state
        .inventory_service
        .create_item_group(&admin, &req)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(group))))
}

/// PUT /api/admin/item-groups/{id}
pub async fn update_item_group(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<ItemGroupChanges>,
) -> ApiResult<Json<ApiResponse<ItemGroupRecord>>> {
    let group = state
        .inventory_service
        .update_item_group(&admin, &id, &req)
        .await?;
    Ok(Json(ApiResponse::ok(group)))
}

/// DELETE /api/admin/item-groups/{id}
pub async fn delete_item_group(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .inventory_service
        .delete_item_group(&admin, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/items
pub async fn create_item(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<NewItem>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ItemRecord>>)> {
    let item = state.inventory_service.create_item(&admin, &req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(item))))
}

/// PUT /api/admin/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<ItemChanges>,
) -> ApiResult<Json<ApiResponse<ItemRecord>>> {
    let item = state
        .inventory_service
        .update_item(&admin, &id, &req)
        .await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// DELETE /api/admin/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.inventory_service.delete_item(&admin, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
