//! In-memory implementation of VerificationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::verification::{VerificationRecord, VerificationType};
use crate::errors::DomainError;

use super::trait_::VerificationRepository;

type Key = (String, VerificationType);

/// Process-local verification store for development and tests
///
/// Records are lost on restart. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct InMemoryVerificationRepository {
    records: Arc<RwLock<HashMap<Key, VerificationRecord>>>,
}

impl InMemoryVerificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl VerificationRepository for InMemoryVerificationRepository {
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        let key = (record.target.clone(), record.verification_type);
        self.records.write().await.insert(key, record.clone());
        Ok(())
    }

    async fn find(
        &self,
        target: &str,
        verification_type: VerificationType,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&(target.to_string(), verification_type)).cloned())
    }

    async fn delete(&self, record: &VerificationRecord) -> Result<bool, DomainError> {
        let key = (record.target.clone(), record.verification_type);
        let mut records = self.records.write().await;

        match records.get(&key) {
            Some(stored) if stored.id == record.id => {
                records.remove(&key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        Ok((before - records.len()) as u64)
    }
}
