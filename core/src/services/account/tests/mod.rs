//! Tests for the account flows


use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::user::User;
use crate::domain::entities::verification::{VerificationRecord, VerificationType};
use crate::forms::FormData;
use crate::repositories::{InMemoryUserRepository, InMemoryVerificationRepository, VerificationRepository};
use crate::services::clock::FixedClock;
use crate::services::verification::{VerificationService, VerificationServiceConfig};

use super::{OnboardingService, PasswordResetService, VerifyService};
use mocks::MockEmailSender;

pub(super) const KODY_EMAIL: &str = "kody@example.com";

pub(super) struct Harness {
    pub users: Arc<InMemoryUserRepository>,
    pub codes: Arc<InMemoryVerificationRepository>,
    pub clock: Arc<FixedClock>,
    pub email: Arc<MockEmailSender>,
    pub verification: Arc<VerificationService<InMemoryVerificationRepository>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_email(MockEmailSender::new(false))
    }

    pub fn with_failing_email() -> Self {
        Self::with_email(MockEmailSender::new(true))
    }

    fn with_email(email: MockEmailSender) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let codes = Arc::new(InMemoryVerificationRepository::new());
        let clock = Arc::new(FixedClock::new(start()));
        let config = VerificationServiceConfig::from_base_url("https://notekeep.dev").unwrap();
        let verification = Arc::new(VerificationService::new(codes.clone(), clock.clone(), config));
        Self {
            users,
            codes,
            clock,
            email: Arc::new(email),
            verification,
        }
    }

    pub fn password_reset(
        &self,
    ) -> PasswordResetService<InMemoryUserRepository, InMemoryVerificationRepository, MockEmailSender>
    {
        PasswordResetService::new(self.users.clone(), self.verification.clone(), self.email.clone())
    }

    pub fn onboarding(
        &self,
    ) -> OnboardingService<InMemoryUserRepository, InMemoryVerificationRepository, MockEmailSender>
    {
        OnboardingService::new(self.users.clone(), self.verification.clone(), self.email.clone())
    }

    pub fn verify(&self) -> VerifyService<InMemoryUserRepository, InMemoryVerificationRepository> {
        VerifyService::new(self.users.clone(), self.verification.clone())
    }

    pub async fn add_user(&self, email: &str, username: &str) -> User {
        use crate::repositories::UserRepository;
        self.users.create(User::new(email, username)).await.unwrap()
    }

    pub async fn stored(&self, target: &str, verification_type: VerificationType) -> Option<VerificationRecord> {
        self.codes.find(target, verification_type).await.unwrap()
    }
}

pub(super) fn start() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
}

pub(super) fn verify_form(code: &str, verification_type: &str, target: &str) -> FormData {
    FormData::new()
        .with("code", code)
        .with("type", verification_type)
        .with("target", target)
}
