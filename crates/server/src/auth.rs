use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use models::user::{self, Role};
use service::auth::domain::{LoginInput, RegisterInput, TokenClaims, VerifyOtpInput};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::user_service;

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub otp_ttl_secs: i64,
    pub otp_resend_secs: i64,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    /// One service instance per request; the repository only borrows the pool.
    pub fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        let repo = Arc::new(SeaOrmAuthRepository { db: self.db.clone() });
        AuthService::new(
            repo,
            AuthConfig {
                jwt_secret: Some(self.auth.jwt_secret.clone()),
                password_algorithm: "argon2".into(),
                token_ttl_hours: self.auth.token_ttl_hours,
                otp_ttl_secs: self.auth.otp_ttl_secs,
                otp_resend_secs: self.auth.otp_resend_secs,
            },
        )
    }
}

/// Verified token claims made available to handlers via request extensions.
#[derive(Clone, Debug)]
pub struct AuthClaims {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Extractor for handlers that need the calling user.
pub struct CurrentUser(pub AuthClaims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| JsonApiError::new(StatusCode::UNAUTHORIZED, "authentication required"))
    }
}

pub fn require_role(claims: &AuthClaims, allowed: &[Role]) -> Result<(), JsonApiError> {
    if allowed.contains(&claims.role) {
        Ok(())
    } else {
        Err(JsonApiError::forbidden())
    }
}

pub fn require_admin(claims: &AuthClaims) -> Result<(), JsonApiError> {
    require_role(claims, &[Role::Admin, Role::Superadmin])
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub token: String,
}

#[derive(Deserialize)]
pub struct ResendOtpInput {
    pub email: String,
}

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered, OTP issued"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<RegisterOutput>, JsonApiError> {
    // Validate using models helpers before touching the service
    if let Err(e) = user::validate_email(&input.email) {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, e.to_string()));
    }
    if let Err(e) = user::validate_name(&input.first_name) {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, e.to_string()));
    }
    if let Err(e) = user::validate_name(&input.last_name) {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, e.to_string()));
    }
    if let Err(e) = user::validate_phone(&input.phone) {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, e.to_string()));
    }

    let svc = state.auth_service();
    let created = svc.register(input).await?;
    Ok(Json(RegisterOutput { user_id: created.id, email: created.email }))
}

#[utoipa::path(post, path = "/auth/verify-otp", tag = "auth", request_body = crate::openapi::VerifyOtpRequest, responses((status = 200, description = "Account verified"), (status = 401, description = "Wrong or expired code")))]
pub async fn verify_otp(
    State(state): State<ServerState>,
    Json(input): Json<VerifyOtpInput>,
) -> Result<Json<service::auth::domain::AuthUser>, JsonApiError> {
    let svc = state.auth_service();
    let verified = svc.verify_otp(input).await?;
    Ok(Json(verified))
}

#[utoipa::path(post, path = "/auth/resend-otp", tag = "auth", request_body = crate::openapi::ResendOtpRequest, responses((status = 204, description = "New code issued"), (status = 429, description = "Requested too recently")))]
pub async fn resend_otp(
    State(state): State<ServerState>,
    Json(input): Json<ResendOtpInput>,
) -> Result<StatusCode, JsonApiError> {
    let svc = state.auth_service();
    svc.resend_otp(&input.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized"), (status = 403, description = "Not verified")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let svc = state.auth_service();
    let session = svc.login(input).await?;
    let user = session.user;
    if let Some(token) = session.token {
        let mut cookie = Cookie::new("auth_token", token.clone());
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(false);
        cookie.set_same_site(axum_extra::extract::cookie::SameSite::Lax);
        let jar = jar.add(cookie);
        let out = LoginOutput {
            user_id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            token,
        };
        return Ok((jar, Json(out)));
    }
    Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "token generation failed"))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::from("auth_token"));
    (jar, StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/auth/me", tag = "auth", responses((status = 200, description = "Current profile"), (status = 401, description = "Unauthorized")))]
pub async fn me(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<user::Model>, JsonApiError> {
    let found = user_service::get_user(&state.db, claims.user_id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("user"))?;
    Ok(Json(found))
}

/// Paths that skip token validation. Directory reads are open to everyone;
/// everything that writes, or exposes caller-scoped data, needs a token.
fn is_public(method: &Method, path: &str) -> bool {
    if *method == Method::OPTIONS {
        return true;
    }
    if path == "/health"
        || path == "/auth/login"
        || path == "/auth/register"
        || path == "/auth/verify-otp"
        || path == "/auth/resend-otp"
    {
        return true;
    }
    if path.starts_with("/docs") || path.starts_with("/api-docs") {
        return true;
    }
    if *method == Method::GET {
        const PUBLIC_READ: [&str; 8] = [
            "/regions", "/subjects", "/fields", "/centers", "/branches", "/courses", "/comments", "/resources",
        ];
        return PUBLIC_READ
            .iter()
            .any(|p| path == *p || path.strip_prefix(*p).is_some_and(|rest| rest.starts_with('/')));
    }
    false
}

/// Global middleware: outside the public whitelist, require a valid
/// `Authorization: Bearer <token>` or `auth_token` cookie.
/// Missing token yields 400, invalid or expired 401.
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = req.uri().path().to_string();
    let method = req.method().clone();

    if is_public(&method, &path) {
        return Ok(next.run(req).await);
    }

    // Read the Authorization header; fall back to the auth_token cookie
    let token = {
        let authz = req
            .headers()
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        if let Some(h) = authz {
            let prefix = "Bearer ";
            if !h.starts_with(prefix) {
                tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(StatusCode::UNAUTHORIZED);
            }
            h[prefix.len()..].to_string()
        } else {
            let cookie_header = req
                .headers()
                .get(axum::http::header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");

            let mut token_val: Option<String> = None;
            for part in cookie_header.split(';') {
                let kv = part.trim();
                if let Some(rest) = kv.strip_prefix("auth_token=") {
                    token_val = Some(rest.to_string());
                    break;
                }
            }

            match token_val {
                Some(t) if !t.is_empty() => t,
                _ => {
                    tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
                    return Err(StatusCode::BAD_REQUEST);
                }
            }
        }
    };

    let key = DecodingKey::from_secret(state.auth.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    match decode::<TokenClaims>(&token, &key, &validation) {
        Ok(data) => {
            let claims = data.claims;
            let user_id = match Uuid::parse_str(&claims.uid) {
                Ok(id) => id,
                Err(e) => {
                    tracing::error!(path = %path, err = %e, "token uid is not a uuid");
                    return Err(StatusCode::UNAUTHORIZED);
                }
            };
            let role = match Role::parse(&claims.role) {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!(path = %path, err = %e, "token carries unknown role");
                    return Err(StatusCode::UNAUTHORIZED);
                }
            };
            req.extensions_mut().insert(AuthClaims { user_id, email: claims.sub, role });
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::error!(path = %path, err = %e, "token validation failed");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_whitelist_covers_reads_and_auth_entry_points() {
        assert!(is_public(&Method::GET, "/health"));
        assert!(is_public(&Method::POST, "/auth/login"));
        assert!(is_public(&Method::POST, "/auth/verify-otp"));
        assert!(is_public(&Method::GET, "/centers"));
        assert!(is_public(&Method::GET, "/centers/8b2c6f4e-0000-0000-0000-000000000000"));
        assert!(is_public(&Method::OPTIONS, "/receptions"));
    }

    #[test]
    fn mutations_and_private_reads_are_protected() {
        assert!(!is_public(&Method::POST, "/centers"));
        assert!(!is_public(&Method::DELETE, "/regions/x"));
        assert!(!is_public(&Method::GET, "/receptions"));
        assert!(!is_public(&Method::GET, "/likes/mine"));
        assert!(!is_public(&Method::GET, "/users"));
        assert!(!is_public(&Method::GET, "/auth/me"));
        // Prefix match must not leak sibling paths
        assert!(!is_public(&Method::GET, "/centersecret"));
    }

    #[test]
    fn role_guards() {
        let claims = AuthClaims { user_id: Uuid::new_v4(), email: "a@b.c".into(), role: Role::Ceo };
        assert!(require_role(&claims, &[Role::Ceo, Role::Admin]).is_ok());
        assert!(require_admin(&claims).is_err());
        let admin = AuthClaims { user_id: Uuid::new_v4(), email: "a@b.c".into(), role: Role::Superadmin };
        assert!(require_admin(&admin).is_ok());
    }
}
