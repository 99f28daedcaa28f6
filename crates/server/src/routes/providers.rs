use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use service::auth::domain::LoginInput;
use service::auth::repo::seaorm::ProviderAccounts;
use service::auth::service::{AuthConfig, AuthService};
use service::provider_service::{self, RegisterProvider, UpdateProfile};

use crate::errors::ApiError;
use crate::routes::accounts::ServerState;

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub service_type: String,
    pub experience: i32,
    #[serde(default = "default_experience_unit")]
    pub experience_unit: String,
    pub license_image: Option<String>,
    pub profile_image: Option<String>,
}

fn default_experience_unit() -> String {
    "years".to_string()
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub success: bool,
    pub provider_id: Uuid,
    pub email: String,
    pub name: String,
    pub token: String,
}

#[utoipa::path(post, path = "/provider/register", tag = "providers", request_body = crate::openapi::ProviderRegisterRequest, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 409, description = "Duplicate email")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let created = provider_service::register(
        &state.db,
        RegisterProvider {
            name: body.name,
            email: body.email,
            phone: body.phone,
            password: body.password,
            service_type: body.service_type,
            experience: body.experience,
            experience_unit: body.experience_unit,
            license_image: body.license_image,
            profile_image: body.profile_image,
        },
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Provider registered successfully",
            "provider": created,
        })),
    ))
}

#[utoipa::path(post, path = "/provider/login", tag = "providers", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in"), (status = 401, description = "Bad credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), ApiError> {
    let svc = AuthService::new(
        Arc::new(ProviderAccounts { db: state.db.clone() }),
        AuthConfig::new(state.auth.jwt_secret.clone()),
    );
    let session = svc.login(input).await?;

    let mut cookie = Cookie::new("auth_token", session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(axum_extra::extract::cookie::SameSite::Lax);
    let jar = jar.add(cookie);

    Ok((
        jar,
        Json(LoginOutput {
            success: true,
            provider_id: session.account_id,
            email: session.email,
            name: session.name,
            token: session.token,
        }),
    ))
}

#[utoipa::path(get, path = "/provider/profile/{id}", tag = "providers", params(("id" = Uuid, Path,)), responses((status = 200, description = "Profile"), (status = 404, description = "Not Found")))]
pub async fn get_profile(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let provider = provider_service::get_profile(&state.db, id)
        .await?
        .ok_or_else(|| service::errors::ServiceError::not_found("provider"))?;
    Ok(Json(serde_json::json!({ "success": true, "provider": provider })))
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateProfileBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub service_type: Option<String>,
    pub experience: Option<i32>,
}

#[utoipa::path(put, path = "/provider/profile/{id}", tag = "providers", params(("id" = Uuid, Path,)), request_body = crate::openapi::UpdateProfileRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Empty update"), (status = 409, description = "Email in use")))]
pub async fn update_profile(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProfileBody>,
) -> Result<Json<common::types::Ack>, ApiError> {
    provider_service::update_profile(
        &state.db,
        id,
        UpdateProfile {
            name: body.name,
            email: body.email,
            phone: body.phone,
            service_type: body.service_type,
            experience: body.experience,
        },
    )
    .await?;
    Ok(Json(common::types::Ack::ok("Profile updated successfully")))
}
