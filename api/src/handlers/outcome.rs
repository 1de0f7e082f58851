//! Rendering of [`FormOutcome`] values
//!
//! Forms that stay on the page answer with their submission state:
//!
//! ```json
//! { "status": "error", "submission": { "intent": "submit", "payload": {}, "error": {} } }
//! ```
//!
//! Idle forms answer 200, invalid ones 400 and failed ones 500. Redirects
//! answer 302 and carry any changed session state as signed cookies.

use actix_web::http::header;
use actix_web::HttpResponse;
use serde::Serialize;

use nk_core::forms::Submission;
use nk_core::services::{FormOutcome, Redirect};

use crate::session::SessionKeys;

#[derive(Serialize)]
struct FormState<'a, T> {
    status: &'static str,
    submission: &'a Submission<T>,
}

pub fn form_response<T: Serialize>(outcome: FormOutcome<T>, keys: &SessionKeys) -> HttpResponse {
    match outcome {
        FormOutcome::Idle(submission) => HttpResponse::Ok().json(FormState {
            status: "idle",
            submission: &submission,
        }),
        FormOutcome::Invalid(submission) => HttpResponse::BadRequest().json(FormState {
            status: "error",
            submission: &submission,
        }),
        FormOutcome::Failed(submission) => HttpResponse::InternalServerError().json(FormState {
            status: "error",
            submission: &submission,
        }),
        FormOutcome::Redirect(redirect) => redirect_response(redirect, keys),
    }
}

pub fn redirect_response(redirect: Redirect, keys: &SessionKeys) -> HttpResponse {
    let mut response = HttpResponse::Found();
    response.insert_header((header::LOCATION, redirect.location));

    if let Some(cookie) = redirect
        .verify_session
        .as_ref()
        .and_then(|session| keys.verify_cookie(session))
    {
        response.cookie(cookie);
    }
    if let Some(cookie) = redirect
        .toast
        .as_ref()
        .and_then(|toast| keys.toast_cookie(toast))
    {
        response.cookie(cookie);
    }

    response.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use nk_core::domain::value_objects::{Toast, VerifySession};
    use nk_core::forms::{FormData, ForgotPasswordForm};
    use nk_shared::SessionConfig;

    fn keys() -> SessionKeys {
        SessionKeys::new(&SessionConfig::default()).unwrap()
    }

    #[test]
    fn test_status_codes_follow_outcome() {
        let keys = keys();
        let submission = Submission::<ForgotPasswordForm>::parse(&FormData::new());

        let idle = form_response(FormOutcome::Idle(submission.clone()), &keys);
        assert_eq!(idle.status(), StatusCode::OK);

        let invalid = form_response(FormOutcome::Invalid(submission.clone()), &keys);
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let failed = form_response(FormOutcome::Failed(submission), &keys);
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_redirect_sets_location_and_cookies() {
        let redirect = Redirect::to("/onboarding")
            .with_verify_session(VerifySession {
                onboarding_email: Some("kody@example.com".to_string()),
                ..Default::default()
            })
            .with_toast(Toast::new("Welcome", "Thanks for signing up!"));

        let response = redirect_response(redirect, &keys());
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/onboarding"
        );

        let names: Vec<String> = response.cookies().map(|c| c.name().to_string()).collect();
        assert!(names.contains(&"nk_verification".to_string()));
        assert!(names.contains(&"nk_toast".to_string()));
    }

    #[test]
    fn test_plain_redirect_sets_no_cookies() {
        let response = redirect_response(Redirect::to("/"), &keys());
        assert_eq!(response.cookies().count(), 0);
    }
}
