//! Per-item status within a group.

use axum::Json;
use axum::extract::{Path, Query, State};

use deskbook_service::availability::ItemStatus;

use crate::dto::request::DateQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/item-groups/{id}/items?date=YYYY-MM-DD
pub async fn list_items(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<ApiResponse<Vec<ItemStatus>>>> {
    let items = state
        .availability_service
        .list_item_status(&auth, &id, query.date.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(items)))
}
