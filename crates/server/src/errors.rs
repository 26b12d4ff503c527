use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Uniform JSON error body: `{"message": "..."}` with a mapped status.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn not_found(entity: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{} not found", entity))
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "insufficient role")
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "request failed");
        }
        (self.status, Json(serde_json::json!({"message": self.message}))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Validation(_) | ServiceError::Model(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.to_string())
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let status = match &e {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Unauthorized | AuthError::OtpInvalid | AuthError::OtpExpired => StatusCode::UNAUTHORIZED,
            AuthError::NotVerified => StatusCode::FORBIDDEN,
            AuthError::Throttled => StatusCode::TOO_MANY_REQUESTS,
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_status_mapping() {
        assert_eq!(JsonApiError::from(ServiceError::Validation("x".into())).status, StatusCode::BAD_REQUEST);
        assert_eq!(JsonApiError::from(ServiceError::not_found("center")).status, StatusCode::NOT_FOUND);
        assert_eq!(JsonApiError::from(ServiceError::Conflict("x".into())).status, StatusCode::CONFLICT);
        assert_eq!(JsonApiError::from(ServiceError::Db("x".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_error_status_mapping() {
        assert_eq!(JsonApiError::from(AuthError::OtpExpired).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::NotVerified).status, StatusCode::FORBIDDEN);
        assert_eq!(JsonApiError::from(AuthError::Throttled).status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(JsonApiError::from(AuthError::Conflict).status, StatusCode::CONFLICT);
    }
}
