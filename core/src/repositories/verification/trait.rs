//! Verification repository trait defining the interface for pending
//! verification records.
//!
//! Records are keyed by `(target, verification_type)`. Implementations must
//! make `upsert` a single overwrite and `delete` an atomic
//! compare-and-delete, so that only one of several concurrent redemptions
//! can remove a record.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::verification::{VerificationRecord, VerificationType};
use crate::errors::DomainError;

#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Store a record, replacing any record with the same key
    ///
    /// # Returns
    /// * `Ok(())` - Record written
    /// * `Err(DomainError)` - Storage failure; nothing was written
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), DomainError>;

    /// Find the record for a key
    ///
    /// Expired records may still be returned; expiry is checked by the caller.
    async fn find(
        &self,
        target: &str,
        verification_type: VerificationType,
    ) -> Result<Option<VerificationRecord>, DomainError>;

    /// Delete `record` if it is still the stored record for its key
    ///
    /// # Returns
    /// * `Ok(true)` - This call removed the record
    /// * `Ok(false)` - The record was already removed or superseded
    /// * `Err(DomainError)` - Storage failure
    async fn delete(&self, record: &VerificationRecord) -> Result<bool, DomainError>;

    /// Remove every record that expired before `now`, returning how many
    /// were removed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
