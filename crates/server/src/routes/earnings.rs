use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use service::earnings_service;

use crate::errors::ApiError;
use crate::routes::accounts::ServerState;

#[utoipa::path(get, path = "/provider/earnings/{id}", tag = "earnings", params(("id" = Uuid, Path,)), responses((status = 200, description = "Earnings summary")))]
pub async fn summary(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let summary = earnings_service::earnings_summary(&state.db, id).await?;
    let breakdown = earnings_service::monthly_breakdown(&state.db, id, 6).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "earnings": summary,
        "monthly_breakdown": breakdown,
    })))
}

#[utoipa::path(get, path = "/provider/dashboard/{id}", tag = "earnings", params(("id" = Uuid, Path,)), responses((status = 200, description = "Dashboard snapshot"), (status = 404, description = "Unknown provider")))]
pub async fn dashboard(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let snapshot = earnings_service::dashboard_snapshot(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "dashboard": snapshot })))
}
