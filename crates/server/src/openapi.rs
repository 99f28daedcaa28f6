use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct ProviderRegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub service_type: String,
    pub experience: i32,
    pub experience_unit: Option<String>,
    pub license_image: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(utoipa::ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub service_type: Option<String>,
    pub experience: Option<i32>,
}

#[derive(utoipa::ToSchema)]
pub struct BookingRequest {
    pub provider_id: Uuid,
    pub customer_name: String,
    pub service_type: String,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(utoipa::ToSchema)]
pub struct UpdateJobStatusRequest { pub status: String, pub notes: Option<String> }

#[derive(utoipa::ToSchema)]
pub struct CreateServiceRequest {
    pub provider_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub availability: Option<String>,
}

#[derive(utoipa::ToSchema)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub availability: Option<String>,
}

#[derive(utoipa::ToSchema)]
pub struct AdminRegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub admin_secret: String,
}

#[derive(utoipa::ToSchema)]
pub struct UserRegisterRequest { pub name: String, pub email: String, pub password: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::providers::register,
        crate::routes::providers::login,
        crate::routes::providers::get_profile,
        crate::routes::providers::update_profile,
        crate::routes::jobs::create_booking,
        crate::routes::jobs::get_booking,
        crate::routes::jobs::list_for_provider,
        crate::routes::jobs::update_status,
        crate::routes::earnings::summary,
        crate::routes::earnings::dashboard,
        crate::routes::transactions::list_for_provider,
        crate::routes::offerings::create,
        crate::routes::offerings::list_for_provider,
        crate::routes::offerings::update,
        crate::routes::offerings::delete,
        crate::routes::accounts::admin_register,
        crate::routes::accounts::admin_login,
        crate::routes::accounts::user_register,
        crate::routes::accounts::user_login,
        crate::routes::accounts::logout,
        crate::routes::accounts::profile,
    ),
    components(
        schemas(
            HealthResponse,
            ProviderRegisterRequest,
            LoginRequest,
            UpdateProfileRequest,
            BookingRequest,
            UpdateJobStatusRequest,
            CreateServiceRequest,
            UpdateServiceRequest,
            AdminRegisterRequest,
            UserRegisterRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "providers"),
        (name = "jobs"),
        (name = "earnings"),
        (name = "transactions"),
        (name = "services"),
        (name = "accounts")
    )
)]
pub struct ApiDoc;
