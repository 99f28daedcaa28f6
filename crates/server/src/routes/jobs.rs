use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use common::types::Ack;
use models::job::NewJob;
use service::job_service;
use service::pagination::Pagination;

use crate::errors::ApiError;
use crate::routes::accounts::ServerState;

#[derive(Debug, Deserialize)]
pub struct BookingBody {
    pub provider_id: Uuid,
    pub customer_name: String,
    pub service_type: String,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<DateTime<Utc>>,
    pub time: Option<String>,
}

#[utoipa::path(post, path = "/bookings", tag = "jobs", request_body = crate::openapi::BookingRequest, responses((status = 201, description = "Booking created"), (status = 404, description = "Unknown provider")))]
pub async fn create_booking(
    State(state): State<ServerState>,
    Json(body): Json<BookingBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let created = job_service::create_booking(
        &state.db,
        NewJob {
            provider_id: body.provider_id,
            customer_name: body.customer_name,
            service_type: body.service_type,
            description: body.description,
            amount: body.amount,
            date: body.date.map(Into::into),
            time: body.time,
        },
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Booking created successfully",
            "booking": created,
        })),
    ))
}

#[utoipa::path(get, path = "/bookings/{id}", tag = "jobs", params(("id" = Uuid, Path,)), responses((status = 200, description = "Booking"), (status = 404, description = "Not Found")))]
pub async fn get_booking(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let job = job_service::get_job(&state.db, id)
        .await?
        .ok_or_else(|| service::errors::ServiceError::not_found("booking"))?;
    Ok(Json(serde_json::json!({ "success": true, "booking": job })))
}

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[utoipa::path(get, path = "/provider/jobs/{id}", tag = "jobs", params(("id" = Uuid, Path,), ("status" = Option<String>, Query,)), responses((status = 200, description = "Jobs for the provider")))]
pub async fn list_for_provider(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let jobs = match (query.page, query.per_page) {
        (None, None) => job_service::list_jobs_by_provider(&state.db, id, query.status.as_deref()).await?,
        (page, per_page) => {
            let opts = Pagination {
                page: page.unwrap_or(1),
                per_page: per_page.unwrap_or(20),
            };
            job_service::list_jobs_by_provider_paginated(&state.db, id, query.status.as_deref(), opts).await?
        }
    };
    Ok(Json(serde_json::json!({ "success": true, "jobs": jobs })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: String,
    pub notes: Option<String>,
}

#[utoipa::path(put, path = "/provider/jobs/{id}", tag = "jobs", params(("id" = Uuid, Path,)), request_body = crate::openapi::UpdateJobStatusRequest, responses((status = 200, description = "Status updated"), (status = 400, description = "Invalid status"), (status = 404, description = "Unknown job")))]
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateStatusBody>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    // a body without a status field is a client error, not unprocessable
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    job_service::update_job_status(&state.db, id, &body.status, body.notes).await?;
    Ok(Json(Ack::ok("Job status updated successfully")))
}
