//! Health check handler.

use axum::Json;
use axum::extract::State;

use deskbook_core::error::AppError;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/health
///
/// Answers 503 when the PostgreSQL pool cannot run a trivial query.
pub async fn health(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<HealthResponse>>> {
    let database = match &state.database {
        Some(pool) => match pool.health_check().await {
            Ok(true) => "ok",
            Ok(false) => {
                return Err(AppError::service_unavailable("Database unavailable").into());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                return Err(AppError::service_unavailable("Database unavailable").into());
            }
        },
        None => "memory",
    };

    let snapshot = state.inventory_service.snapshot_summary();

    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        snapshot_version: snapshot.version,
        database: database.to_string(),
    })))
}
