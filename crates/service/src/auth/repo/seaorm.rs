use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials, StoredOtp};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use models::user::Role;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn to_auth_user(u: models::user::Model) -> Result<AuthUser, AuthError> {
    let role = Role::parse(&u.role).map_err(|e| AuthError::Repository(e.to_string()))?;
    Ok(AuthUser {
        id: u.id,
        email: u.email,
        first_name: u.first_name,
        last_name: u.last_name,
        role,
        is_verified: u.is_verified,
    })
}

fn to_stored_otp(o: models::otp_code::Model) -> StoredOtp {
    StoredOtp {
        id: o.id,
        email: o.email,
        code: o.code,
        issued_at: o.created_at.with_timezone(&Utc),
        expires_at: o.expires_at.with_timezone(&Utc),
        consumed: o.consumed,
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        res.map(to_auth_user).transpose()
    }

    async fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
    ) -> Result<AuthUser, AuthError> {
        let created = models::user::create(&self.db, first_name, last_name, email, phone, Role::User)
            .await
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        to_auth_user(created)
    }

    async fn mark_verified(&self, user_id: Uuid) -> Result<AuthUser, AuthError> {
        let updated = models::user::set_verified(&self.db, user_id)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        to_auth_user(updated)
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_for_user(&self.db, user_id)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|c| Credentials {
            user_id: c.user_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        }))
    }

    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let c = models::user_credentials::upsert_password(&self.db, user_id, password_hash, &password_algorithm)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(Credentials {
            user_id: c.user_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        })
    }

    async fn store_otp(&self, email: &str, code: &str, expires_at: DateTime<Utc>) -> Result<StoredOtp, AuthError> {
        let created = models::otp_code::create(&self.db, email, code, expires_at.into())
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(to_stored_otp(created))
    }

    async fn latest_otp(&self, email: &str) -> Result<Option<StoredOtp>, AuthError> {
        let res = models::otp_code::latest_for_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_stored_otp))
    }

    async fn consume_otp(&self, id: Uuid) -> Result<(), AuthError> {
        models::otp_code::consume(&self.db, id)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))
    }
}
