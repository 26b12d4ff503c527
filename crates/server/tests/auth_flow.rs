use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use serde_json::json;
use tower::Service;
use uuid::Uuid;

use server::auth;
use server::routes;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

async fn build_app() -> anyhow::Result<(Router, DatabaseConnection)> {
    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        let msg = format!("{}", e);
        if msg.contains("duplicate key value violates unique constraint") {
            eprintln!("migrations already applied, continue: {}", msg);
        } else {
            return Err(e.into());
        }
    }
    let state = auth::ServerState {
        db: db.clone(),
        auth: auth::ServerAuthConfig {
            jwt_secret: "test-secret".into(),
            token_ttl_hours: 12,
            otp_ttl_secs: 300,
            otp_resend_secs: 60,
        },
    };
    Ok((routes::build_router(cors(), state), db))
}

fn json_post(uri: &str, body: serde_json::Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?)
}

#[tokio::test]
async fn test_register_verify_and_login_flow() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (app, db) = build_app().await?;

    let email = format!("user_{}@example.com", Uuid::new_v4());
    let password = "S3curePass!";

    // Register
    let req = json_post(
        "/auth/register",
        json!({"first_name": "Test", "last_name": "User", "email": email, "phone": "+998901234567", "password": password}),
    )?;
    let resp = app.clone().call(req).await?;
    eprintln!("register status={}", resp.status());
    assert_eq!(resp.status(), StatusCode::OK);

    // Login before verification is refused
    let req = json_post("/auth/login", json!({"email": email, "password": password}))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Fetch the issued code straight from the table and verify
    let code = models::otp_code::latest_for_email(&db, &email)
        .await
        .expect("otp lookup")
        .expect("otp issued on register")
        .code;
    let req = json_post("/auth/verify-otp", json!({"email": email, "code": code}))?;
    let resp = app.clone().call(req).await?;
    eprintln!("verify status={}", resp.status());
    assert_eq!(resp.status(), StatusCode::OK);

    // Login succeeds and sets the cookie
    let req = json_post("/auth/login", json!({"email": email, "password": password}))?;
    let resp = app.clone().call(req).await?;
    eprintln!("login status={}", resp.status());
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get("set-cookie");
    assert!(cookie.is_some());
    Ok(())
}

#[tokio::test]
async fn test_wrong_otp_rejected() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (app, db) = build_app().await?;

    let email = format!("user_{}@example.com", Uuid::new_v4());
    let req = json_post(
        "/auth/register",
        json!({"first_name": "Test", "last_name": "User", "email": email, "phone": "+998901234567", "password": "StrongPass123"}),
    )?;
    let _ = app.clone().call(req).await?;

    let real = models::otp_code::latest_for_email(&db, &email).await.unwrap().unwrap().code;
    let wrong = if real == "000000" { "000001".to_string() } else { "000000".to_string() };
    let req = json_post("/auth/verify-otp", json!({"email": email, "code": wrong}))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (app, db) = build_app().await?;

    let email = format!("user_{}@example.com", Uuid::new_v4());
    let req = json_post(
        "/auth/register",
        json!({"first_name": "Test", "last_name": "User", "email": email, "phone": "+998901234567", "password": "StrongPass123"}),
    )?;
    let _ = app.clone().call(req).await?;
    let code = models::otp_code::latest_for_email(&db, &email).await.unwrap().unwrap().code;
    let req = json_post("/auth/verify-otp", json!({"email": email, "code": code}))?;
    let _ = app.clone().call(req).await?;

    let req = json_post("/auth/login", json!({"email": email, "password": "wrong"}))?;
    let resp = app.clone().call(req).await?;
    eprintln!("login wrong pass status={}", resp.status());
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_register_short_password_rejected() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (app, _db) = build_app().await?;

    let req = json_post(
        "/auth/register",
        json!({"first_name": "A", "last_name": "B", "email": "a@b.com", "phone": "+998901234567", "password": "short"}),
    )?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_resend_is_throttled_right_after_register() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (app, _db) = build_app().await?;

    let email = format!("user_{}@example.com", Uuid::new_v4());
    let req = json_post(
        "/auth/register",
        json!({"first_name": "Test", "last_name": "User", "email": email, "phone": "+998901234567", "password": "StrongPass123"}),
    )?;
    let _ = app.clone().call(req).await?;

    let req = json_post("/auth/resend-otp", json!({"email": email}))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    Ok(())
}

#[tokio::test]
async fn test_public_reads_pass_without_token() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (app, _db) = build_app().await?;

    for uri in ["/health", "/regions", "/centers", "/subjects"] {
        let req = Request::builder().method("GET").uri(uri).body(Body::empty())?;
        let resp = app.clone().call(req).await?;
        assert_eq!(resp.status(), StatusCode::OK, "GET {} should be public", uri);
    }
    Ok(())
}

#[tokio::test]
async fn test_protected_routes_require_token() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let (app, _db) = build_app().await?;

    // Missing token entirely -> 400 from the global middleware
    let req = Request::builder().method("GET").uri("/receptions").body(Body::empty())?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Mutations on public-read resources are protected too
    let req = json_post("/regions", json!({"name": "Tashkent"}))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
