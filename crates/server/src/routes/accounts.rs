use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use service::auth::domain::LoginInput;
use service::auth::repo::seaorm::UserAccounts;
use service::auth::service::{AuthConfig, AuthService};
use service::user_service;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub admin_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    pub fn user_auth(&self) -> AuthService<UserAccounts> {
        AuthService::new(
            Arc::new(UserAccounts { db: self.db.clone() }),
            AuthConfig::new(self.auth.jwt_secret.clone()),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct AdminRegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
    pub admin_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct UserRegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub success: bool,
    pub message: String,
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct SessionOutput {
    pub success: bool,
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub token: String,
}

#[utoipa::path(post, path = "/admin/register", tag = "accounts", request_body = crate::openapi::AdminRegisterRequest, responses((status = 201, description = "Created"), (status = 403, description = "Bad admin secret"), (status = 409, description = "Duplicate email")))]
pub async fn admin_register(
    State(state): State<ServerState>,
    Json(body): Json<AdminRegisterBody>,
) -> Result<(StatusCode, Json<RegisterOutput>), ApiError> {
    if state.auth.admin_secret.is_empty() || body.admin_secret != state.auth.admin_secret {
        return Err(ApiError::Forbidden("invalid admin secret".into()));
    }
    let created =
        user_service::register_user(&state.db, &body.name, &body.email, &body.password, models::user::ROLE_ADMIN)
            .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterOutput {
            success: true,
            message: "Admin registered successfully".into(),
            user_id: created.id,
        }),
    ))
}

#[utoipa::path(post, path = "/admin/login", tag = "accounts", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in"), (status = 401, description = "Bad credentials"), (status = 403, description = "Not an admin")))]
pub async fn admin_login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<SessionOutput>), ApiError> {
    let session = state.user_auth().login(input).await?;
    if session.role != models::user::ROLE_ADMIN {
        return Err(ApiError::Forbidden("not an admin account".into()));
    }
    let jar = set_auth_cookie(jar, &session.token);
    Ok((jar, Json(session_output(session))))
}

#[utoipa::path(post, path = "/api/auth/register", tag = "accounts", request_body = crate::openapi::UserRegisterRequest, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 409, description = "Duplicate email")))]
pub async fn user_register(
    State(state): State<ServerState>,
    Json(body): Json<UserRegisterBody>,
) -> Result<(StatusCode, Json<RegisterOutput>), ApiError> {
    let created =
        user_service::register_user(&state.db, &body.name, &body.email, &body.password, models::user::ROLE_USER)
            .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterOutput {
            success: true,
            message: "User registered successfully".into(),
            user_id: created.id,
        }),
    ))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "accounts", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in"), (status = 401, description = "Bad credentials")))]
pub async fn user_login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<SessionOutput>), ApiError> {
    let session = state.user_auth().login(input).await?;
    let jar = set_auth_cookie(jar, &session.token);
    Ok((jar, Json(session_output(session))))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "accounts", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::from("auth_token"));
    (jar, StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/auth/profile", tag = "accounts", responses((status = 200, description = "Current account"), (status = 401, description = "Missing or invalid token")))]
pub async fn profile(
    State(state): State<ServerState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = bearer_or_cookie(&headers, &jar)
        .ok_or_else(|| ApiError::Auth(service::auth::errors::AuthError::Unauthorized))?;
    let claims = state.user_auth().decode_token(&token)?;
    let uid = Uuid::parse_str(&claims.uid)
        .map_err(|_| ApiError::Auth(service::auth::errors::AuthError::Unauthorized))?;
    let user = user_service::get_user(&state.db, uid)
        .await?
        .ok_or_else(|| service::errors::ServiceError::not_found("user"))?;
    Ok(Json(serde_json::json!({ "success": true, "user": user })))
}

fn set_auth_cookie(jar: CookieJar, token: &str) -> CookieJar {
    let mut cookie = Cookie::new("auth_token", token.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(axum_extra::extract::cookie::SameSite::Lax);
    jar.add(cookie)
}

fn bearer_or_cookie(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    if let Some(value) = headers.get(axum::http::header::AUTHORIZATION) {
        if let Ok(s) = value.to_str() {
            if let Some(token) = s.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }
    jar.get("auth_token").map(|c| c.value().to_string())
}

fn session_output(session: service::auth::domain::AuthSession) -> SessionOutput {
    SessionOutput {
        success: true,
        user_id: session.account_id,
        email: session.email,
        name: session.name,
        role: session.role,
        token: session.token,
    }
}
