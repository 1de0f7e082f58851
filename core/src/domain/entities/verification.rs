//! Verification record entity for the email confirmation handshake.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Length of the short code a user types in
pub const CODE_LENGTH: usize = 6;

/// Random bytes in the secret embedded in verification links
pub const SECRET_BYTES: usize = 32;

/// Purpose tag scoping a verification record to one use case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationType {
    /// Confirms control of an email address before signup
    Onboarding,
    /// Authorizes choosing a new password
    ResetPassword,
}

impl VerificationType {
    pub const ALL: [VerificationType; 2] =
        [VerificationType::Onboarding, VerificationType::ResetPassword];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationType::Onboarding => "onboarding",
            VerificationType::ResetPassword => "reset-password",
        }
    }
}

impl std::fmt::Display for VerificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VerificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onboarding" => Ok(VerificationType::Onboarding),
            "reset-password" => Ok(VerificationType::ResetPassword),
            _ => Err(format!("Unknown verification type: {}", s)),
        }
    }
}

/// A pending verification, keyed by `(target, verification_type)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Identity of this issuance; a re-issue for the same key gets a new id
    pub id: Uuid,

    /// Address the code was sent to
    pub target: String,

    /// Purpose tag
    pub verification_type: VerificationType,

    /// Short numeric code
    pub code: String,

    /// SHA-256 hex digest of the link secret
    pub secret_hash: String,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Build a record created at `now` that lapses after `expires_at`
    pub fn new(
        target: impl Into<String>,
        verification_type: VerificationType,
        code: impl Into<String>,
        secret_hash: impl Into<String>,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            target: target.into(),
            verification_type,
            code: code.into(),
            secret_hash: secret_hash.into(),
            created_at: now,
            expires_at,
        }
    }

    /// A record is expired strictly after `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Seconds left before expiry, zero once expired
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }

    /// Compare a submitted value against the code or the link secret.
    ///
    /// Six digits are compared to the short code; anything else is hashed
    /// and compared to the stored secret digest. Both comparisons run in
    /// constant time.
    pub fn matches(&self, submitted: &str) -> bool {
        if looks_like_code(submitted) {
            constant_time_eq(submitted.as_bytes(), self.code.as_bytes())
        } else {
            let hashed = hash_secret(submitted);
            constant_time_eq(hashed.as_bytes(), self.secret_hash.as_bytes())
        }
    }
}

/// `now + period_seconds`, or `None` when the period is not positive or the
/// instant falls outside the representable range
pub fn expiry_after(now: DateTime<Utc>, period_seconds: i64) -> Option<DateTime<Utc>> {
    if period_seconds <= 0 {
        return None;
    }
    Duration::try_seconds(period_seconds).and_then(|period| now.checked_add_signed(period))
}

fn looks_like_code(value: &str) -> bool {
    value.len() == CODE_LENGTH && value.bytes().all(|b| b.is_ascii_digit())
}

/// Uniformly random 6-digit code from the OS CSPRNG
pub fn generate_code() -> String {
    let code: u32 = OsRng.gen_range(0..1_000_000);
    format!("{:06}", code)
}

/// 32 random bytes from the OS CSPRNG, hex encoded
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// SHA-256 hex digest of a link secret
pub fn hash_secret(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(now: DateTime<Utc>) -> VerificationRecord {
        VerificationRecord::new(
            "a@example.com",
            VerificationType::ResetPassword,
            "482913",
            hash_secret("s3cret"),
            now,
            now + Duration::seconds(600),
        )
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generate_secret_is_64_hex_chars() {
        let secret = generate_secret();
        assert_eq!(secret.len(), SECRET_BYTES * 2);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(secret, generate_secret());
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let record = record(now);

        assert!(!record.is_expired_at(now + Duration::seconds(600)));
        assert!(record.is_expired_at(now + Duration::seconds(601)));
        assert_eq!(record.remaining_seconds(now + Duration::seconds(601)), 0);
    }

    #[test]
    fn test_expiry_after_rejects_unrepresentable_periods() {
        let now = Utc::now();

        assert_eq!(expiry_after(now, 600), Some(now + Duration::seconds(600)));
        assert_eq!(expiry_after(now, 0), None);
        assert_eq!(expiry_after(now, -5), None);
        assert_eq!(expiry_after(now, i64::MAX), None);
        // fits in a Duration but lands past the last representable date
        assert_eq!(expiry_after(now, i64::MAX / 1000), None);
    }

    #[test]
    fn test_matches_code_or_secret() {
        let record = record(Utc::now());

        assert!(record.matches("482913"));
        assert!(record.matches("s3cret"));
        assert!(!record.matches("000000"));
        assert!(!record.matches(&record.secret_hash));
    }

    #[test]
    fn test_verification_type_tags() {
        assert_eq!(VerificationType::ResetPassword.to_string(), "reset-password");
        assert_eq!(
            "onboarding".parse::<VerificationType>(),
            Ok(VerificationType::Onboarding)
        );
        assert!("change-email".parse::<VerificationType>().is_err());
        assert_eq!(
            serde_json::to_value(VerificationType::ResetPassword).unwrap(),
            serde_json::json!("reset-password")
        );
    }
}
