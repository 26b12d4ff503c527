use axum::{
    middleware,
    routing::{get, patch, post},
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

use crate::auth::{self, ServerState};

pub mod regions;
pub mod subjects;
pub mod fields;
pub mod centers;
pub mod branches;
pub mod courses;
pub mod comments;
pub mod likes;
pub mod resources;
pub mod receptions;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service healthy")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: auth, catalog, centers, community,
/// receptions/users, plus Swagger UI. The token middleware wraps everything;
/// public reads pass through via its whitelist.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/verify-otp", post(auth::verify_otp))
        .route("/auth/resend-otp", post(auth::resend_otp))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me));

    // Reference data managed by admins
    let catalog = Router::new()
        .route("/regions", get(regions::list).post(regions::create))
        .route("/regions/:id", get(regions::get).put(regions::update).delete(regions::delete))
        .route("/subjects", get(subjects::list).post(subjects::create))
        .route("/subjects/:id", get(subjects::get).put(subjects::update).delete(subjects::delete))
        .route("/fields", get(fields::list).post(fields::create))
        .route("/fields/:id", get(fields::get).put(fields::update).delete(fields::delete));

    // Centers and what hangs off them
    let center_routes = Router::new()
        .route("/centers", get(centers::list).post(centers::create))
        .route("/centers/:id", get(centers::get).patch(centers::update).delete(centers::delete))
        .route("/branches", get(branches::list).post(branches::create))
        .route("/branches/:id", get(branches::get).patch(branches::update).delete(branches::delete))
        .route("/courses", get(courses::list).post(courses::create))
        .route("/courses/:id", get(courses::get).patch(courses::update).delete(courses::delete));

    // User-generated content
    let community = Router::new()
        .route("/comments", get(comments::list).post(comments::create))
        .route("/comments/:id", get(comments::get).patch(comments::update).delete(comments::delete))
        .route("/likes", post(likes::create))
        .route("/likes/mine", get(likes::mine))
        .route("/likes/:center_id", axum::routing::delete(likes::delete))
        .route("/resources", get(resources::list).post(resources::create))
        .route("/resources/:id", get(resources::get).patch(resources::update).delete(resources::delete));

    // Caller-scoped and administrative surfaces
    let accounts = Router::new()
        .route("/receptions", get(receptions::list).post(receptions::create))
        .route("/receptions/:id", get(receptions::get).patch(receptions::update_status).delete(receptions::delete))
        .route("/users", get(users::list))
        .route("/users/:id", get(users::get).patch(users::update).delete(users::delete))
        .route("/users/:id/role", patch(users::update_role));

    Router::new()
        .route("/health", get(health))
        .merge(auth_routes)
        .merge(catalog)
        .merge(center_routes)
        .merge(community)
        .merge(accounts)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token_state))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
