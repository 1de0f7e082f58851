//! Tests for the verification service

mod cleanup_tests;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;

use crate::domain::entities::verification::{VerificationRecord, VerificationType};
use crate::errors::DomainError;
use crate::repositories::{InMemoryVerificationRepository, VerificationRepository};
use crate::services::clock::FixedClock;
use crate::services::verification::{IssuedVerification, VerificationService, VerificationServiceConfig};

pub(super) fn start() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
}

pub(super) fn service() -> (
    VerificationService<InMemoryVerificationRepository>,
    Arc<InMemoryVerificationRepository>,
    Arc<FixedClock>,
) {
    let repository = Arc::new(InMemoryVerificationRepository::new());
    let clock = Arc::new(FixedClock::new(start()));
    let config = VerificationServiceConfig::from_base_url("https://notekeep.dev").unwrap();
    let service = VerificationService::new(repository.clone(), clock.clone(), config);
    (service, repository, clock)
}

/// The secret carried in the redemption link
pub(super) fn link_secret(issued: &IssuedVerification) -> String {
    issued
        .redemption_url
        .query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .unwrap()
}

/// Repository whose every call fails
pub(super) struct FailingVerificationRepository;

#[async_trait]
impl VerificationRepository for FailingVerificationRepository {
    async fn upsert(&self, _record: &VerificationRecord) -> Result<(), DomainError> {
        Err(DomainError::storage("database unavailable"))
    }

    async fn find(
        &self,
        _target: &str,
        _verification_type: VerificationType,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        Err(DomainError::storage("database unavailable"))
    }

    async fn delete(&self, _record: &VerificationRecord) -> Result<bool, DomainError> {
        Err(DomainError::storage("database unavailable"))
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<u64, DomainError> {
        Err(DomainError::storage("database unavailable"))
    }
}

pub(super) fn failing_service() -> VerificationService<FailingVerificationRepository> {
    VerificationService::new(
        Arc::new(FailingVerificationRepository),
        Arc::new(FixedClock::new(start())),
        VerificationServiceConfig::new(Url::parse("https://notekeep.dev").unwrap()),
    )
}
