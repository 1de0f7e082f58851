//! Unit tests for the in-memory verification repository

use chrono::{Duration, Utc};

use crate::domain::entities::verification::{hash_secret, VerificationRecord, VerificationType};
use crate::repositories::verification::{InMemoryVerificationRepository, VerificationRepository};

fn record(target: &str, verification_type: VerificationType, period: i64) -> VerificationRecord {
    let now = Utc::now();
    VerificationRecord::new(
        target,
        verification_type,
        "123456",
        hash_secret("secret"),
        now,
        now + Duration::seconds(period),
    )
}

#[tokio::test]
async fn test_upsert_and_find() {
    let repo = InMemoryVerificationRepository::new();
    let stored = record("a@example.com", VerificationType::Onboarding, 600);

    repo.upsert(&stored).await.unwrap();

    let found = repo
        .find("a@example.com", VerificationType::Onboarding)
        .await
        .unwrap();
    assert_eq!(found, Some(stored));

    let other_purpose = repo
        .find("a@example.com", VerificationType::ResetPassword)
        .await
        .unwrap();
    assert!(other_purpose.is_none());
}

#[tokio::test]
async fn test_upsert_overwrites_same_key() {
    let repo = InMemoryVerificationRepository::new();
    let first = record("a@example.com", VerificationType::Onboarding, 600);
    let second = record("a@example.com", VerificationType::Onboarding, 600);

    repo.upsert(&first).await.unwrap();
    repo.upsert(&second).await.unwrap();

    assert_eq!(repo.len().await, 1);
    let found = repo
        .find("a@example.com", VerificationType::Onboarding)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, second.id);
}

#[tokio::test]
async fn test_delete_only_removes_current_record() {
    let repo = InMemoryVerificationRepository::new();
    let first = record("a@example.com", VerificationType::ResetPassword, 600);
    let second = record("a@example.com", VerificationType::ResetPassword, 600);

    repo.upsert(&first).await.unwrap();
    repo.upsert(&second).await.unwrap();

    // superseded record must not remove its replacement
    assert!(!repo.delete(&first).await.unwrap());
    assert!(repo.delete(&second).await.unwrap());
    assert!(!repo.delete(&second).await.unwrap());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_delete_expired() {
    let repo = InMemoryVerificationRepository::new();
    repo.upsert(&record("a@example.com", VerificationType::Onboarding, 60))
        .await
        .unwrap();
    repo.upsert(&record("b@example.com", VerificationType::Onboarding, 3600))
        .await
        .unwrap();

    let removed = repo
        .delete_expired(Utc::now() + Duration::seconds(120))
        .await
        .unwrap();

    assert_eq!(removed, 1);
    assert!(repo
        .find("b@example.com", VerificationType::Onboarding)
        .await
        .unwrap()
        .is_some());
}
