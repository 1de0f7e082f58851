//! Signup, forgot-password and verify handlers

use actix_web::{web, HttpRequest, HttpResponse};

use nk_core::forms::FormData;
use nk_core::repositories::{UserRepository, VerificationRepository};
use nk_core::services::EmailSender;

use crate::app::AppState;
use crate::handlers::{form_response, ApiError};

/// POST /signup
///
/// Emails an onboarding verification and redirects to the code entry page.
pub async fn signup<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    form: web::Form<FormData>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    R: VerificationRepository + 'static,
    E: EmailSender + 'static,
{
    let outcome = state.onboarding.request_signup(&form).await?;
    Ok(form_response(outcome, &state.sessions))
}

/// POST /forgot-password
pub async fn forgot_password<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    form: web::Form<FormData>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    R: VerificationRepository + 'static,
    E: EmailSender + 'static,
{
    let outcome = state.password_reset.request_reset(&form).await?;
    Ok(form_response(outcome, &state.sessions))
}

/// GET /verify
///
/// Redeems the `code` of a verification link. Without one the empty form
/// state comes back so the code can be typed in.
pub async fn verify_link<U, R, E>(
    req: HttpRequest,
    state: web::Data<AppState<U, R, E>>,
    query: web::Query<FormData>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    R: VerificationRepository + 'static,
    E: EmailSender + 'static,
{
    let session = state.sessions.verify_session(&req);
    let outcome = state.verify.verify_link(&query, session).await?;
    Ok(form_response(outcome, &state.sessions))
}

/// POST /verify
pub async fn verify<U, R, E>(
    req: HttpRequest,
    state: web::Data<AppState<U, R, E>>,
    form: web::Form<FormData>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    R: VerificationRepository + 'static,
    E: EmailSender + 'static,
{
    let session = state.sessions.verify_session(&req);
    let outcome = state.verify.verify(&form, session).await?;
    Ok(form_response(outcome, &state.sessions))
}
