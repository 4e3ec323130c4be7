//! Snapshot reload.

use axum::Json;
use axum::extract::State;

use deskbook_service::inventory::SnapshotSummary;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::state::AppState;

/// POST /api/admin/reload
pub async fn reload(
    State(state): State<AppState>,
    admin: AdminUser,
) -> ApiResult<Json<ApiResponse<SnapshotSummary>>> {
    let summary = state.inventory_service.reload_snapshot(&admin).await?;
    Ok(Json(ApiResponse::ok(summary)))
}
