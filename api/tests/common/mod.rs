#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::{test, web};
use chrono::{DateTime, Utc};

use nk_api::{AppState, SessionKeys};
use nk_core::domain::entities::user::User;
use nk_core::domain::entities::verification::{VerificationRecord, VerificationType};
use nk_core::repositories::{
    InMemoryUserRepository, InMemoryVerificationRepository, UserRepository,
    VerificationRepository,
};
use nk_core::services::{FixedClock, VerificationServiceConfig};
use nk_infra::email::MockEmailService;
use nk_shared::SessionConfig;

pub const BASE_URL: &str = "https://notekeep.test";
pub const KODY_EMAIL: &str = "kody@example.com";

pub type TestState = AppState<InMemoryUserRepository, InMemoryVerificationRepository, MockEmailService>;

pub struct TestContext {
    pub users: Arc<InMemoryUserRepository>,
    pub verifications: Arc<InMemoryVerificationRepository>,
    pub email: Arc<MockEmailService>,
    pub clock: Arc<FixedClock>,
    pub state: web::Data<TestState>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_email(MockEmailService::new())
    }

    pub fn with_failing_email() -> Self {
        Self::with_email(MockEmailService::failing())
    }

    fn with_email(email: MockEmailService) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let verifications = Arc::new(InMemoryVerificationRepository::new());
        let email = Arc::new(email);
        let clock = Arc::new(FixedClock::new(start()));
        let sessions = SessionKeys::new(&SessionConfig::default()).unwrap();
        let config = VerificationServiceConfig::from_base_url(BASE_URL).unwrap();

        let state = web::Data::new(AppState::new(
            users.clone(),
            verifications.clone(),
            email.clone(),
            clock.clone(),
            config,
            sessions,
        ));

        Self {
            users,
            verifications,
            email,
            clock,
            state,
        }
    }

    pub async fn add_user(&self, email: &str, username: &str) -> User {
        self.users.create(User::new(email, username)).await.unwrap()
    }

    pub async fn stored(
        &self,
        target: &str,
        verification_type: VerificationType,
    ) -> Option<VerificationRecord> {
        self.verifications
            .find(target, verification_type)
            .await
            .unwrap()
    }
}

pub fn start() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("response should redirect")
        .to_str()
        .unwrap()
        .to_string()
}

pub fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

/// Read a response cookie back the way the next request would
pub fn request_with(cookie: Cookie<'static>) -> actix_web::HttpRequest {
    test::TestRequest::default().cookie(cookie).to_http_request()
}
