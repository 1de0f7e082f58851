//! Configuration for the verification service

use chrono::Utc;
use url::Url;

use crate::domain::entities::verification::{expiry_after, VerificationType};
use crate::errors::VerificationError;

/// Path of the page that redeems verifications
pub const DEFAULT_VERIFY_PATH: &str = "/verify";

/// Default validity of a verification in seconds
pub const DEFAULT_PERIOD_SECONDS: i64 = 10 * 60;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Public origin the links point at
    pub base_url: Url,
    /// Path of the verify page, joined onto `base_url`
    pub verify_path: String,
    /// Validity of password reset verifications in seconds
    pub reset_password_period_seconds: i64,
    /// Validity of onboarding verifications in seconds
    pub onboarding_period_seconds: i64,
}

impl VerificationServiceConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            verify_path: DEFAULT_VERIFY_PATH.to_string(),
            reset_password_period_seconds: DEFAULT_PERIOD_SECONDS,
            onboarding_period_seconds: DEFAULT_PERIOD_SECONDS,
        }
    }

    /// Parse the public origin, e.g. `https://notekeep.dev`
    pub fn from_base_url(base_url: &str) -> Result<Self, VerificationError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            VerificationError::invalid_input(format!("Invalid base URL '{}': {}", base_url, e))
        })?;
        Ok(Self::new(base_url))
    }

    /// Build from the shared application settings
    pub fn from_settings(
        base_url: &str,
        settings: &nk_shared::VerificationConfig,
    ) -> Result<Self, VerificationError> {
        let mut config = Self::from_base_url(base_url)?;
        config.reset_password_period_seconds =
            checked_period("reset_password_period_seconds", settings.reset_password_period_seconds)?;
        config.onboarding_period_seconds =
            checked_period("onboarding_period_seconds", settings.onboarding_period_seconds)?;
        Ok(config)
    }

    /// Validity period for a purpose
    pub fn period_for(&self, verification_type: VerificationType) -> i64 {
        match verification_type {
            VerificationType::Onboarding => self.onboarding_period_seconds,
            VerificationType::ResetPassword => self.reset_password_period_seconds,
        }
    }
}

/// Reject periods that could never produce an expiry
fn checked_period(name: &str, seconds: i64) -> Result<i64, VerificationError> {
    match expiry_after(Utc::now(), seconds) {
        Some(_) => Ok(seconds),
        None => Err(VerificationError::invalid_input(format!(
            "{} must be a positive number of seconds within range, got {}",
            name, seconds
        ))),
    }
}
