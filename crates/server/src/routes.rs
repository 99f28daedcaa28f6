use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod accounts;
pub mod earnings;
pub mod jobs;
pub mod offerings;
pub mod providers;
pub mod transactions;

use accounts::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: provider portal, bookings, accounts.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let public = Router::new().route("/health", get(health));

    let provider_portal = Router::new()
        .route("/provider/register", post(providers::register))
        .route("/provider/login", post(providers::login))
        .route(
            "/provider/profile/:id",
            get(providers::get_profile).put(providers::update_profile),
        )
        // the :id is the provider on GET and the job on PUT, as in the
        // original portal API
        .route(
            "/provider/jobs/:id",
            get(jobs::list_for_provider).put(jobs::update_status),
        )
        .route("/provider/earnings/:id", get(earnings::summary))
        .route("/provider/dashboard/:id", get(earnings::dashboard))
        .route("/provider/transactions/:id", get(transactions::list_for_provider))
        .route("/provider/services", post(offerings::create))
        // same convention: provider id on GET, service id on PUT/DELETE
        .route(
            "/provider/services/:id",
            get(offerings::list_for_provider)
                .put(offerings::update)
                .delete(offerings::delete),
        );

    let bookings = Router::new()
        .route("/bookings", post(jobs::create_booking))
        .route("/bookings/:id", get(jobs::get_booking));

    let account_routes = Router::new()
        .route("/admin/register", post(accounts::admin_register))
        .route("/admin/login", post(accounts::admin_login))
        .route("/api/auth/register", post(accounts::user_register))
        .route("/api/auth/login", post(accounts::user_login))
        .route("/api/auth/logout", post(accounts::logout))
        .route("/api/auth/profile", get(accounts::profile));

    public
        .merge(provider_portal)
        .merge(bookings)
        .merge(account_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
