use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth;
use crate::routes;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Auth settings from config.toml, env vars filling the gaps.
fn load_auth_config() -> auth::ServerAuthConfig {
    let mut auth_cfg = configs::load_default().map(|c| c.auth).unwrap_or_default();
    auth_cfg.normalize_from_env();
    let jwt_secret = if auth_cfg.jwt_secret.trim().is_empty() {
        "dev-secret-change-me".to_string()
    } else {
        auth_cfg.jwt_secret
    };
    auth::ServerAuthConfig {
        jwt_secret,
        token_ttl_hours: auth_cfg.token_ttl_hours,
        otp_ttl_secs: auth_cfg.otp_ttl_secs,
        otp_resend_secs: auth_cfg.otp_resend_secs,
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    common::env::ensure_env("assets", "data").await?;

    // DB connection
    let db = models::db::connect().await?;

    let state = auth::ServerState { db, auth: load_auth_config() };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, "starting directory server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
