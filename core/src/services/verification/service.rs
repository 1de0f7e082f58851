//! Main verification service implementation

use std::sync::Arc;

use nk_shared::utils::mask_email;
use url::Url;

use crate::domain::entities::verification::{
    expiry_after, generate_code, generate_secret, hash_secret, VerificationRecord,
    VerificationType,
};
use crate::errors::{DomainError, VerificationError};
use crate::repositories::VerificationRepository;
use crate::services::clock::Clock;

use super::config::VerificationServiceConfig;
use super::types::{IssuedVerification, RedeemedVerification};

/// Issues and redeems email verifications
pub struct VerificationService<R: VerificationRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    config: VerificationServiceConfig,
}

impl<R: VerificationRepository> VerificationService<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>, config: VerificationServiceConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a verification for `target`
    ///
    /// Generates a short code and an independent link secret, then writes a
    /// single record valid for `period_seconds`, replacing any earlier record
    /// for the same target and purpose. Nothing is stored when URL building
    /// fails, and a failed write leaves no record behind.
    pub async fn issue(
        &self,
        target: &str,
        verification_type: VerificationType,
        period_seconds: i64,
    ) -> Result<IssuedVerification, VerificationError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(VerificationError::invalid_input("Target must not be empty"));
        }
        let now = self.clock.now();
        let expires_at = expiry_after(now, period_seconds).ok_or_else(|| {
            VerificationError::invalid_input(format!(
                "Validity period of {} seconds is out of range",
                period_seconds
            ))
        })?;

        let code = generate_code();
        let secret = generate_secret();

        let redirect_to = self.verify_url(target, verification_type)?;
        let mut redemption_url = redirect_to.clone();
        redemption_url.query_pairs_mut().append_pair("code", &secret);

        let record = VerificationRecord::new(
            target,
            verification_type,
            code.clone(),
            hash_secret(&secret),
            now,
            expires_at,
        );

        self.repository
            .upsert(&record)
            .await
            .map_err(storage_failure)?;

        tracing::debug!(
            recipient = %mask_email(target),
            verification_type = %verification_type,
            verification_id = %record.id,
            expires_at = %record.expires_at,
            "Stored verification record"
        );

        Ok(IssuedVerification {
            target: record.target,
            verification_type,
            code,
            redemption_url,
            redirect_to,
            expires_at: record.expires_at,
        })
    }

    /// Issue a verification with the configured period for its purpose
    pub async fn prepare_verification(
        &self,
        target: &str,
        verification_type: VerificationType,
    ) -> Result<IssuedVerification, VerificationError> {
        let period = self.config.period_for(verification_type);
        let issued = self.issue(target, verification_type, period).await?;

        tracing::info!(
            recipient = %mask_email(target),
            verification_type = %verification_type,
            period_seconds = period,
            event = "verification_issued",
            "Prepared verification"
        );

        Ok(issued)
    }

    /// Redeem a verification with its short code or link secret
    ///
    /// On success the record is deleted; a second redemption fails with
    /// `NotFound`. When several requests race, only the one whose delete
    /// removes the record succeeds.
    pub async fn redeem(
        &self,
        target: &str,
        verification_type: VerificationType,
        code_or_secret: &str,
    ) -> Result<RedeemedVerification, VerificationError> {
        let target = target.trim();
        let submitted = code_or_secret.trim();
        if target.is_empty() || submitted.is_empty() {
            return Err(VerificationError::invalid_input(
                "Target and code must not be empty",
            ));
        }

        let record = self
            .repository
            .find(target, verification_type)
            .await
            .map_err(storage_failure)?
            .ok_or(VerificationError::NotFound)?;

        if record.is_expired_at(self.clock.now()) {
            if let Err(e) = self.repository.delete(&record).await {
                tracing::warn!(
                    error = %e,
                    verification_id = %record.id,
                    "Failed to delete expired verification record"
                );
            }
            tracing::info!(
                recipient = %mask_email(target),
                verification_type = %verification_type,
                event = "verification_expired",
                "Verification code expired"
            );
            return Err(VerificationError::Expired);
        }

        if !record.matches(submitted) {
            tracing::info!(
                recipient = %mask_email(target),
                verification_type = %verification_type,
                event = "verification_mismatch",
                "Verification code mismatch"
            );
            return Err(VerificationError::Mismatch);
        }

        let removed = self
            .repository
            .delete(&record)
            .await
            .map_err(storage_failure)?;
        if !removed {
            // another request redeemed or re-issued it first
            return Err(VerificationError::NotFound);
        }

        tracing::info!(
            recipient = %mask_email(target),
            verification_type = %verification_type,
            event = "verification_redeemed",
            "Verification redeemed"
        );

        Ok(RedeemedVerification {
            target: record.target,
            verification_type,
        })
    }

    /// `{base_url}{verify_path}?type=<purpose>&target=<target>`
    fn verify_url(
        &self,
        target: &str,
        verification_type: VerificationType,
    ) -> Result<Url, VerificationError> {
        let mut url = self
            .config
            .base_url
            .join(&self.config.verify_path)
            .map_err(|e| VerificationError::invalid_input(format!("Invalid verify URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("type", verification_type.as_str())
            .append_pair("target", target);
        Ok(url)
    }
}

fn storage_failure(e: DomainError) -> VerificationError {
    tracing::error!(error = %e, event = "verification_storage_failed", "Verification storage failed");
    VerificationError::StorageFailure {
        message: e.to_string(),
    }
}
