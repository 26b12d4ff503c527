use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::domain::{AuthUser, Credentials, StoredOtp};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
    ) -> Result<AuthUser, AuthError>;
    async fn mark_verified(&self, user_id: Uuid) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError>;

    async fn store_otp(&self, email: &str, code: &str, expires_at: DateTime<Utc>) -> Result<StoredOtp, AuthError>;
    async fn latest_otp(&self, email: &str) -> Result<Option<StoredOtp>, AuthError>;
    async fn consume_otp(&self, id: Uuid) -> Result<(), AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use models::user::Role;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, AuthUser>>, // key: email
        creds: Mutex<HashMap<Uuid, Credentials>>, // key: user_id
        otps: Mutex<Vec<StoredOtp>>,
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(email).cloned())
        }

        async fn create_user(
            &self,
            first_name: &str,
            last_name: &str,
            email: &str,
            phone: &str,
        ) -> Result<AuthUser, AuthError> {
            let _ = phone;
            let mut users = self.users.lock().unwrap();
            if users.contains_key(email) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                email: email.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                role: Role::User,
                is_verified: false,
            };
            users.insert(email.to_string(), user.clone());
            Ok(user)
        }

        async fn mark_verified(&self, user_id: Uuid) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .values_mut()
                .find(|u| u.id == user_id)
                .ok_or(AuthError::NotFound)?;
            user.is_verified = true;
            Ok(user.clone())
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&user_id).cloned())
        }

        async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
            let mut creds = self.creds.lock().unwrap();
            let c = Credentials { user_id, password_hash, password_algorithm };
            creds.insert(user_id, c.clone());
            Ok(c)
        }

        async fn store_otp(&self, email: &str, code: &str, expires_at: DateTime<Utc>) -> Result<StoredOtp, AuthError> {
            let mut otps = self.otps.lock().unwrap();
            let otp = StoredOtp {
                id: Uuid::new_v4(),
                email: email.to_string(),
                code: code.to_string(),
                issued_at: Utc::now(),
                expires_at,
                consumed: false,
            };
            otps.push(otp.clone());
            Ok(otp)
        }

        async fn latest_otp(&self, email: &str) -> Result<Option<StoredOtp>, AuthError> {
            let otps = self.otps.lock().unwrap();
            Ok(otps
                .iter()
                .filter(|o| o.email == email && !o.consumed)
                .max_by_key(|o| o.issued_at)
                .cloned())
        }

        async fn consume_otp(&self, id: Uuid) -> Result<(), AuthError> {
            let mut otps = self.otps.lock().unwrap();
            match otps.iter_mut().find(|o| o.id == id) {
                Some(o) => {
                    o.consumed = true;
                    Ok(())
                }
                None => Err(AuthError::NotFound),
            }
        }
    }
}
