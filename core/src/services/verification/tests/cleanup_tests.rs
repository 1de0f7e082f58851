//! Unit tests for the expiry sweep

use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::verification::VerificationType;
use crate::services::verification::VerificationCleanupService;

use super::{service, start};

#[tokio::test]
async fn test_run_cleanup_removes_only_expired() {
    let (service, repository, clock) = service();
    service
        .issue("a@example.com", VerificationType::Onboarding, 60)
        .await
        .unwrap();
    service
        .issue("b@example.com", VerificationType::Onboarding, 3600)
        .await
        .unwrap();

    let cleanup = VerificationCleanupService::new(repository.clone(), clock.clone(), 300);
    assert_eq!(cleanup.run_cleanup().await.unwrap(), 0);

    clock.set(start() + Duration::seconds(61));
    assert_eq!(cleanup.run_cleanup().await.unwrap(), 1);
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_disabled_cleanup_does_not_spawn() {
    let (_service, repository, clock) = service();
    let cleanup = Arc::new(VerificationCleanupService::new(repository, clock, 0));
    assert!(cleanup.start_background_task().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_background_task_sweeps_on_interval() {
    let (service, repository, clock) = service();
    service
        .issue("a@example.com", VerificationType::Onboarding, 60)
        .await
        .unwrap();
    clock.set(start() + Duration::seconds(61));

    let cleanup = Arc::new(VerificationCleanupService::new(repository.clone(), clock, 10));
    let handle = cleanup.start_background_task().unwrap();

    tokio::time::sleep(std::time::Duration::from_secs(11)).await;
    assert!(repository.is_empty().await);

    handle.abort();
}
