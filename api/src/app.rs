//! Application state and factory
//!
//! This module wires the core services into a shared state and provides the
//! factory for the Actix-web application.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};

use nk_core::repositories::{UserRepository, VerificationRepository};
use nk_core::services::{
    Clock, EmailSender, NotesService, OnboardingService, PasswordResetService,
    VerificationService, VerificationServiceConfig, VerifyService,
};

use crate::routes::{account, notes, onboarding};
use crate::session::SessionKeys;

/// Services shared by every worker
pub struct AppState<U, R, E>
where
    U: UserRepository,
    R: VerificationRepository,
    E: EmailSender,
{
    pub onboarding: Arc<OnboardingService<U, R, E>>,
    pub password_reset: Arc<PasswordResetService<U, R, E>>,
    pub verify: Arc<VerifyService<U, R>>,
    pub notes: Arc<NotesService<U>>,
    pub sessions: SessionKeys,
}

impl<U, R, E> AppState<U, R, E>
where
    U: UserRepository,
    R: VerificationRepository,
    E: EmailSender,
{
    pub fn new(
        users: Arc<U>,
        verifications: Arc<R>,
        email: Arc<E>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
        sessions: SessionKeys,
    ) -> Self {
        let verification = Arc::new(VerificationService::new(verifications, clock, config));

        Self {
            onboarding: Arc::new(OnboardingService::new(
                users.clone(),
                verification.clone(),
                email.clone(),
            )),
            password_reset: Arc::new(PasswordResetService::new(
                users.clone(),
                verification.clone(),
                email,
            )),
            verify: Arc::new(VerifyService::new(users.clone(), verification)),
            notes: Arc::new(NotesService::new(users)),
            sessions,
        }
    }
}

/// Create the application with all routes
///
/// Request logging middleware is added by the caller so tests can use the
/// bare app.
pub fn create_app<U, R, E>(
    app_state: web::Data<AppState<U, R, E>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    R: VerificationRepository + 'static,
    E: EmailSender + 'static,
{
    App::new()
        .app_data(app_state)
        .route("/health", web::get().to(health_check))
        .route("/signup", web::post().to(account::signup::<U, R, E>))
        .route(
            "/forgot-password",
            web::post().to(account::forgot_password::<U, R, E>),
        )
        .service(
            web::resource("/verify")
                .route(web::get().to(account::verify_link::<U, R, E>))
                .route(web::post().to(account::verify::<U, R, E>)),
        )
        .route("/onboarding", web::get().to(onboarding::index::<U, R, E>))
        .route(
            "/onboarding/company",
            web::post().to(onboarding::create_company::<U, R, E>),
        )
        .route(
            "/users/{username}/notes",
            web::get().to(notes::index::<U, R, E>),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "notekeep-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "NOT_FOUND",
        "message": "The requested resource was not found"
    }))
}
