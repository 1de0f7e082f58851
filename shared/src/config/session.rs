//! Session cookie configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Minimum secret length accepted for cookie signing keys
pub const MIN_SECRET_LENGTH: usize = 32;

/// Signed session cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Secret used to derive the cookie signing key
    pub secret: String,

    /// Cookie carrying the authenticated user
    pub cookie_name: String,

    /// Cookie carrying the verification handshake state
    pub verify_cookie_name: String,

    /// Cookie carrying a one-shot toast message
    pub toast_cookie_name: String,

    /// Cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Lifetime of the verification cookie in seconds
    pub verify_max_age_seconds: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-session-secret-change-in-production"),
            cookie_name: String::from("nk_session"),
            verify_cookie_name: String::from("nk_verification"),
            toast_cookie_name: String::from("nk_toast"),
            secure: false,
            verify_max_age_seconds: 600,
        }
    }
}

impl SessionConfig {
    /// Override the secret from `SESSION_SECRET`
    pub fn from_env_or(fallback: Self) -> Self {
        Self {
            secret: env_or("SESSION_SECRET", fallback.secret),
            ..fallback
        }
    }

    /// Whether the secret is long enough to derive a signing key
    pub fn has_valid_secret(&self) -> bool {
        self.secret.len() >= MIN_SECRET_LENGTH
    }
}
