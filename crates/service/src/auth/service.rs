use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{encode, Header as JwtHeader, EncodingKey};
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};

use super::domain::{RegisterInput, LoginInput, VerifyOtpInput, AuthUser, AuthSession, TokenClaims};
use super::errors::AuthError;
use super::otp::{self, LogOtpSender, OtpSender};
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub password_algorithm: String,
    pub token_ttl_hours: i64,
    pub otp_ttl_secs: i64,
    pub otp_resend_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            password_algorithm: "argon2".into(),
            token_ttl_hours: 12,
            otp_ttl_secs: 300,
            otp_resend_secs: 60,
        }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
    sender: Arc<dyn OtpSender>,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg, sender: Arc::new(LogOtpSender) }
    }

    pub fn with_sender(repo: Arc<R>, cfg: AuthConfig, sender: Arc<dyn OtpSender>) -> Self {
        Self { repo, cfg, sender }
    }

    /// Register a new unverified user and issue a one-time code.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::default());
    /// let input = RegisterInput { first_name: "Test".into(), last_name: "User".into(), email: "user@example.com".into(), phone: "+998901234567".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// assert!(!user.is_verified);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        if input.password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some(existing) = self.repo.find_user_by_email(&input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let user = self
            .repo
            .create_user(&input.first_name, &input.last_name, &input.email, &input.phone)
            .await?;
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let _cred = self.repo.upsert_password(user.id, hash, self.cfg.password_algorithm.clone()).await?;

        let code = otp::generate_code();
        let _stored = self.repo.store_otp(&user.email, &code, otp::expiry(self.cfg.otp_ttl_secs)).await?;
        self.sender.deliver(&user.email, &code);

        info!(user_id = %user.id, email = %user.email, "user_registered");
        Ok(user)
    }

    /// Verify the one-time code issued at registration and activate the account.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository, repository::AuthRepository};
    /// use service::auth::domain::{RegisterInput, VerifyOtpInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo.clone(), AuthConfig::default());
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { first_name: "N".into(), last_name: "M".into(), email: "v@e.com".into(), phone: "+998901112233".into(), password: "Passw0rd".into() }));
    /// let code = tokio_test::block_on(repo.latest_otp("v@e.com")).unwrap().unwrap().code;
    /// let user = tokio_test::block_on(svc.verify_otp(VerifyOtpInput { email: "v@e.com".into(), code })).unwrap();
    /// assert!(user.is_verified);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn verify_otp(&self, input: VerifyOtpInput) -> Result<AuthUser, AuthError> {
        let user = self
            .repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        if user.is_verified {
            return Err(AuthError::Validation("account already verified".into()));
        }

        let stored = self
            .repo
            .latest_otp(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        otp::check(&stored, &input.code, chrono::Utc::now())?;
        self.repo.consume_otp(stored.id).await?;

        let verified = self.repo.mark_verified(user.id).await?;
        info!(user_id = %verified.id, email = %verified.email, "user_verified");
        Ok(verified)
    }

    /// Re-issue a one-time code for an unverified account, throttled.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn resend_otp(&self, email: &str) -> Result<(), AuthError> {
        let user = self
            .repo
            .find_user_by_email(email)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        if user.is_verified {
            return Err(AuthError::Validation("account already verified".into()));
        }

        if let Some(previous) = self.repo.latest_otp(email).await? {
            let earliest = previous.issued_at + chrono::Duration::seconds(self.cfg.otp_resend_secs);
            if chrono::Utc::now() < earliest {
                return Err(AuthError::Throttled);
            }
        }

        let code = otp::generate_code();
        let _stored = self.repo.store_otp(email, &code, otp::expiry(self.cfg.otp_ttl_secs)).await?;
        self.sender.deliver(email, &code);
        info!(%email, "otp_reissued");
        Ok(())
    }

    /// Authenticate a verified user and optionally issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository, repository::AuthRepository};
    /// use service::auth::domain::{RegisterInput, VerifyOtpInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo.clone(), AuthConfig { jwt_secret: Some("secret".into()), ..AuthConfig::default() });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { first_name: "N".into(), last_name: "M".into(), email: "u@e.com".into(), phone: "+998901112233".into(), password: "Passw0rd".into() }));
    /// let code = tokio_test::block_on(repo.latest_otp("u@e.com")).unwrap().unwrap().code;
    /// let _ = tokio_test::block_on(svc.verify_otp(VerifyOtpInput { email: "u@e.com".into(), code })).unwrap();
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(session.token.is_some());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self
            .repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        if !user.is_verified {
            return Err(AuthError::NotVerified);
        }

        let cred = self
            .repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let mut token = None;
        if let Some(secret) = &self.cfg.jwt_secret {
            let exp = (chrono::Utc::now() + chrono::Duration::hours(self.cfg.token_ttl_hours)).timestamp() as usize;
            let claims = TokenClaims {
                sub: user.email.clone(),
                uid: user.id.to_string(),
                role: user.role.as_str().to_string(),
                exp,
            };
            token = Some(
                encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
                    .map_err(|e| AuthError::TokenError(e.to_string()))?,
            );
        }

        info!(user_id = %user.id, email = %user.email, "user_logged_in");
        Ok(AuthSession { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;
    use crate::auth::domain::{RegisterInput, VerifyOtpInput, LoginInput};

    fn register_input(email: &str) -> RegisterInput {
        RegisterInput {
            first_name: "Test".into(),
            last_name: "User".into(),
            email: email.into(),
            phone: "+998901234567".into(),
            password: "Passw0rd!".into(),
        }
    }

    fn service(repo: Arc<MockAuthRepository>) -> AuthService<MockAuthRepository> {
        AuthService::new(repo, AuthConfig { jwt_secret: Some("test-secret".into()), ..AuthConfig::default() })
    }

    #[tokio::test]
    async fn login_requires_verification() {
        let repo = Arc::new(MockAuthRepository::default());
        let svc = service(repo.clone());
        svc.register(register_input("a@example.com")).await.unwrap();

        let err = svc
            .login(LoginInput { email: "a@example.com".into(), password: "Passw0rd!".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NotVerified));
    }

    #[tokio::test]
    async fn full_register_verify_login_flow() {
        let repo = Arc::new(MockAuthRepository::default());
        let svc = service(repo.clone());
        svc.register(register_input("b@example.com")).await.unwrap();

        let code = repo.latest_otp("b@example.com").await.unwrap().unwrap().code;
        let user = svc
            .verify_otp(VerifyOtpInput { email: "b@example.com".into(), code })
            .await
            .unwrap();
        assert!(user.is_verified);

        let session = svc
            .login(LoginInput { email: "b@example.com".into(), password: "Passw0rd!".into() })
            .await
            .unwrap();
        assert!(session.token.is_some());
    }

    #[tokio::test]
    async fn wrong_otp_does_not_verify() {
        let repo = Arc::new(MockAuthRepository::default());
        let svc = service(repo.clone());
        svc.register(register_input("c@example.com")).await.unwrap();

        let real = repo.latest_otp("c@example.com").await.unwrap().unwrap().code;
        let wrong = if real == "000000" { "000001".to_string() } else { "000000".to_string() };
        let err = svc
            .verify_otp(VerifyOtpInput { email: "c@example.com".into(), code: wrong })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::OtpInvalid));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let repo = Arc::new(MockAuthRepository::default());
        let svc = service(repo.clone());
        svc.register(register_input("d@example.com")).await.unwrap();
        let err = svc.register(register_input("d@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn resend_is_throttled() {
        let repo = Arc::new(MockAuthRepository::default());
        let svc = service(repo.clone());
        svc.register(register_input("e@example.com")).await.unwrap();

        let err = svc.resend_otp("e@example.com").await.unwrap_err();
        assert!(matches!(err, AuthError::Throttled));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let repo = Arc::new(MockAuthRepository::default());
        let svc = service(repo.clone());
        svc.register(register_input("f@example.com")).await.unwrap();
        let code = repo.latest_otp("f@example.com").await.unwrap().unwrap().code;
        svc.verify_otp(VerifyOtpInput { email: "f@example.com".into(), code }).await.unwrap();

        let err = svc
            .login(LoginInput { email: "f@example.com".into(), password: "wrong".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }
}
