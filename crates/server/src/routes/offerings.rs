use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use common::types::Ack;
use service::offering_service::{self, UpdateOffering};

use crate::errors::ApiError;
use crate::routes::accounts::ServerState;

#[derive(Debug, Deserialize)]
pub struct CreateBody {
    pub provider_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub availability: Option<String>,
}

#[utoipa::path(post, path = "/provider/services", tag = "services", request_body = crate::openapi::CreateServiceRequest, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let created = offering_service::create_offering(
        &state.db,
        body.provider_id,
        &body.name,
        body.description,
        body.price,
        body.availability,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Service created successfully",
            "service": created,
        })),
    ))
}

#[utoipa::path(get, path = "/provider/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Provider id")), responses((status = 200, description = "Offerings for the provider")))]
pub async fn list_for_provider(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let services = offering_service::list_by_provider(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "services": services })))
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub availability: Option<String>,
}

#[utoipa::path(put, path = "/provider/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), request_body = crate::openapi::UpdateServiceRequest, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<Ack>, ApiError> {
    offering_service::update_offering(
        &state.db,
        id,
        UpdateOffering {
            name: body.name,
            description: body.description,
            price: body.price,
            availability: body.availability,
        },
    )
    .await?;
    Ok(Json(Ack::ok("Service updated successfully")))
}

#[utoipa::path(delete, path = "/provider/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ApiError> {
    offering_service::delete_offering(&state.db, id).await?;
    Ok(Json(Ack::ok("Service deleted successfully")))
}
