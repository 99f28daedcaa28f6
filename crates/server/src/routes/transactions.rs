use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use service::pagination::Pagination;
use service::transaction_service::{self, TimeFilter};

use crate::errors::ApiError;
use crate::routes::accounts::ServerState;

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub time: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[utoipa::path(get, path = "/provider/transactions/{id}", tag = "transactions", params(("id" = Uuid, Path,), ("time" = Option<String>, Query, description = "all|week|month|quarter")), responses((status = 200, description = "Ledger entries, newest first")))]
pub async fn list_for_provider(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let filter = TimeFilter::parse(query.time.as_deref());
    let transactions = match (query.page, query.per_page) {
        (None, None) => transaction_service::list_by_provider(&state.db, id, filter).await?,
        (page, per_page) => {
            let opts = Pagination {
                page: page.unwrap_or(1),
                per_page: per_page.unwrap_or(20),
            };
            transaction_service::list_by_provider_paginated(&state.db, id, filter, opts).await?
        }
    };
    Ok(Json(serde_json::json!({ "success": true, "transactions": transactions })))
}
