//! OTP generation, expiry and matching.
//!
//! Pure helpers so the verification rules are testable without a database.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::info;

use super::domain::StoredOtp;
use super::errors::AuthError;

pub const CODE_LEN: usize = 6;

/// Random zero-padded 6-digit code.
pub fn generate_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", n)
}

pub fn expiry(ttl_secs: i64) -> DateTime<Utc> {
    Utc::now() + Duration::seconds(ttl_secs)
}

/// Check a submitted code against a stored one at a given instant.
pub fn check(stored: &StoredOtp, submitted: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
    if stored.consumed {
        return Err(AuthError::OtpInvalid);
    }
    if now > stored.expires_at {
        return Err(AuthError::OtpExpired);
    }
    if stored.code != submitted {
        return Err(AuthError::OtpInvalid);
    }
    Ok(())
}

/// Delivery seam. The directory only needs the code to reach the user;
/// how is deployment-specific (SMTP, SMS gateway).
pub trait OtpSender: Send + Sync {
    fn deliver(&self, email: &str, code: &str);
}

/// Development sender: writes the code to the log stream.
pub struct LogOtpSender;

impl OtpSender for LogOtpSender {
    fn deliver(&self, email: &str, code: &str) {
        info!(%email, code, "otp_code_issued");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn stored(code: &str, ttl_secs: i64, consumed: bool) -> StoredOtp {
        let now = Utc::now();
        StoredOtp {
            id: Uuid::new_v4(),
            email: "x@example.com".into(),
            code: code.into(),
            issued_at: now,
            expires_at: now + Duration::seconds(ttl_secs),
            consumed,
        }
    }

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..100 {
            let c = generate_code();
            assert_eq!(c.len(), CODE_LEN);
            assert!(c.chars().all(|ch| ch.is_ascii_digit()));
        }
    }

    #[test]
    fn matching_code_passes() {
        let s = stored("123456", 300, false);
        assert!(check(&s, "123456", Utc::now()).is_ok());
    }

    #[test]
    fn wrong_code_is_invalid() {
        let s = stored("123456", 300, false);
        assert!(matches!(check(&s, "654321", Utc::now()), Err(AuthError::OtpInvalid)));
    }

    #[test]
    fn expired_code_is_rejected_before_comparison() {
        let s = stored("123456", 300, false);
        let later = Utc::now() + Duration::seconds(301);
        assert!(matches!(check(&s, "123456", later), Err(AuthError::OtpExpired)));
    }

    #[test]
    fn consumed_code_cannot_be_reused() {
        let s = stored("123456", 300, true);
        assert!(matches!(check(&s, "123456", Utc::now()), Err(AuthError::OtpInvalid)));
    }
}
