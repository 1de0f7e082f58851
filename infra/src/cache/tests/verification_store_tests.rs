use chrono::{DateTime, Duration, Utc};

use nk_core::domain::entities::verification::{VerificationRecord, VerificationType};
use nk_core::repositories::VerificationRepository;

use super::redis_client_tests::test_config;
use crate::cache::verification_store::{format_record_key, ttl_seconds};
use crate::cache::{RedisClient, RedisVerificationRepository};

fn record(period_seconds: i64) -> VerificationRecord {
    let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    VerificationRecord::new(
        "kody@example.com",
        VerificationType::ResetPassword,
        "123456",
        "ab".repeat(32),
        now,
        now + Duration::seconds(period_seconds),
    )
}

#[test]
fn test_record_key_includes_type_and_target() {
    assert_eq!(
        format_record_key("kody@example.com", VerificationType::ResetPassword),
        "verification:reset-password:kody@example.com"
    );
}

#[test]
fn test_ttl_matches_period() {
    assert_eq!(ttl_seconds(&record(600)), 600);

    let mut short = record(600);
    short.expires_at = short.created_at + Duration::milliseconds(1500);
    assert_eq!(ttl_seconds(&short), 2);

    let mut instant = record(600);
    instant.expires_at = instant.created_at;
    assert_eq!(ttl_seconds(&instant), 1);
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_delete_only_removes_current_issue() {
    let client = RedisClient::new(&test_config()).await.unwrap();
    let repo = RedisVerificationRepository::new(client);

    let first = record(600);
    let second = record(600);
    repo.upsert(&first).await.unwrap();
    repo.upsert(&second).await.unwrap();

    let stored = repo
        .find("kody@example.com", VerificationType::ResetPassword)
        .await
        .unwrap();
    assert_eq!(stored, Some(second.clone()));

    assert!(!repo.delete(&first).await.unwrap());
    assert!(repo.delete(&second).await.unwrap());
    assert!(!repo.delete(&second).await.unwrap());
    assert_eq!(repo.delete_expired(Utc::now()).await.unwrap(), 0);
}
