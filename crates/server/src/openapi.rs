use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(utoipa::ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct VerifyOtpRequest { pub email: String, pub code: String }

#[derive(utoipa::ToSchema)]
pub struct ResendOtpRequest { pub email: String }

#[derive(utoipa::ToSchema)]
pub struct CreateCenterRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub image: Option<String>,
    pub region_id: Uuid,
}

#[derive(utoipa::ToSchema)]
pub struct CreateReceptionRequest {
    pub center_id: Uuid,
    pub field_id: Option<Uuid>,
    /// RFC 3339 timestamp, must be in the future
    pub visit_date: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::auth::register,
        crate::auth::verify_otp,
        crate::auth::resend_otp,
        crate::auth::login,
        crate::auth::me,
        crate::routes::regions::list,
        crate::routes::regions::create,
        crate::routes::centers::list,
        crate::routes::centers::get,
        crate::routes::centers::create,
        crate::routes::receptions::list,
        crate::routes::receptions::create,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            VerifyOtpRequest,
            ResendOtpRequest,
            CreateCenterRequest,
            CreateReceptionRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "catalog"),
        (name = "centers"),
        (name = "receptions")
    )
)]
pub struct ApiDoc;
