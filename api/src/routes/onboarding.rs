//! Onboarding handlers

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use url::form_urlencoded;

use nk_core::errors::DomainError;
use nk_core::forms::FormData;
use nk_core::repositories::{UserRepository, VerificationRepository};
use nk_core::services::account::onboarding_index;
use nk_core::services::EmailSender;

use crate::app::AppState;
use crate::handlers::{form_response, redirect_response, ApiError};

pub const LOGIN_PATH: &str = "/login";

/// GET /onboarding
pub async fn index<U, R, E>(state: web::Data<AppState<U, R, E>>) -> HttpResponse
where
    U: UserRepository + 'static,
    R: VerificationRepository + 'static,
    E: EmailSender + 'static,
{
    redirect_response(onboarding_index(), &state.sessions)
}

/// POST /onboarding/company
///
/// Anonymous requests are sent to the login page with a `redirectTo`
/// pointing back here.
pub async fn create_company<U, R, E>(
    req: HttpRequest,
    state: web::Data<AppState<U, R, E>>,
    form: web::Form<FormData>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    R: VerificationRepository + 'static,
    E: EmailSender + 'static,
{
    let ctx = state.sessions.session_context(&req);
    match state.onboarding.create_company(&ctx, &form).await {
        Ok(outcome) => Ok(form_response(outcome, &state.sessions)),
        Err(DomainError::Unauthorized) => Ok(login_redirect(req.path())),
        Err(e) => Err(e.into()),
    }
}

/// 302 to the login page, returning to `path` afterwards
pub fn login_redirect(path: &str) -> HttpResponse {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("redirectTo", path)
        .finish();
    HttpResponse::Found()
        .insert_header((header::LOCATION, format!("{}?{}", LOGIN_PATH, query)))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_encodes_return_path() {
        let response = login_redirect("/onboarding/company");
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login?redirectTo=%2Fonboarding%2Fcompany"
        );
    }
}
