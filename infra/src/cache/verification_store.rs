//! Redis-backed verification records
//!
//! Each record is stored as JSON under
//! `{prefix}:verification:{type}:{target}` with a TTL matching its
//! remaining validity, so Redis evicts expired records on its own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use nk_core::domain::entities::verification::{VerificationRecord, VerificationType};
use nk_core::errors::DomainError;
use nk_core::repositories::VerificationRepository;
use nk_shared::utils::mask_email;

use super::RedisClient;
use crate::InfrastructureError;

#[derive(Clone)]
pub struct RedisVerificationRepository {
    client: RedisClient,
}

impl RedisVerificationRepository {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn record_key(&self, target: &str, verification_type: VerificationType) -> String {
        self.client.key(&format_record_key(target, verification_type))
    }
}

pub(crate) fn format_record_key(target: &str, verification_type: VerificationType) -> String {
    format!("verification:{}:{}", verification_type.as_str(), target)
}

/// TTL in whole seconds, rounded up and never zero
pub(crate) fn ttl_seconds(record: &VerificationRecord) -> u64 {
    let millis = (record.expires_at - record.created_at).num_milliseconds().max(1);
    (millis as u64).div_ceil(1000)
}

#[async_trait]
impl VerificationRepository for RedisVerificationRepository {
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        let key = self.record_key(&record.target, record.verification_type);
        let value = serde_json::to_string(record).map_err(InfrastructureError::from)?;

        self.client
            .set_with_expiry(&key, &value, ttl_seconds(record))
            .await?;

        tracing::debug!(
            recipient = %mask_email(&record.target),
            verification_id = %record.id,
            "Stored verification in Redis"
        );
        Ok(())
    }

    async fn find(
        &self,
        target: &str,
        verification_type: VerificationType,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        let key = self.record_key(target, verification_type);
        match self.client.get(&key).await? {
            Some(value) => {
                let record = serde_json::from_str(&value).map_err(InfrastructureError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, record: &VerificationRecord) -> Result<bool, DomainError> {
        let key = self.record_key(&record.target, record.verification_type);
        Ok(self
            .client
            .delete_if_id(&key, &record.id.to_string())
            .await?)
    }

    /// Redis expires keys itself; nothing is left to sweep
    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<u64, DomainError> {
        Ok(0)
    }
}
