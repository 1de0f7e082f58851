mod common;

use actix_web::{http::StatusCode, test};

use nk_api::create_app;
use nk_core::domain::entities::user::Role;
use nk_core::domain::value_objects::SessionContext;
use nk_core::repositories::UserRepository;

use common::{location, request_with, response_cookie, TestContext, KODY_EMAIL};

const COMPANY_FORM: [(&str, &str); 5] = [
    ("name", "Kody's Keeps"),
    ("addressLine1", "123 Main St"),
    ("city", "Provo"),
    ("state", "UT"),
    ("zipCode", "84601"),
];

#[actix_web::test]
async fn test_onboarding_index_redirects_to_profile() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/onboarding").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/onboarding/profile");
}

#[actix_web::test]
async fn test_company_requires_signed_in_user() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/onboarding/company")
        .set_form(COMPANY_FORM)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp),
        "/login?redirectTo=%2Fonboarding%2Fcompany"
    );
}

#[actix_web::test]
async fn test_company_is_created_for_signed_in_user() {
    let ctx = TestContext::new();
    let user = ctx.add_user(KODY_EMAIL, "kody").await;
    let session = ctx
        .state
        .sessions
        .session_cookie(&SessionContext::for_user(user.id))
        .unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let mut form: Vec<(&str, &str)> = COMPANY_FORM.to_vec();
    form.push(("redirectTo", "/users/kody/notes"));
    let req = test::TestRequest::post()
        .uri("/onboarding/company")
        .cookie(session)
        .set_form(form)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/users/kody/notes");

    let toast_cookie = response_cookie(&resp, "nk_toast").expect("toast cookie");
    let toast_req = request_with(toast_cookie);
    let raw = toast_req.cookie("nk_toast").unwrap();
    assert!(raw.value().contains("Thanks for signing up!"));

    let user = ctx.users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(user.has_role(Role::Admin));
    let company = user.company.expect("company attached");
    assert_eq!(company.name, "Kody's Keeps");
    assert_eq!(company.address.country, "US");
}

#[actix_web::test]
async fn test_company_offsite_redirect_falls_back_to_root() {
    let ctx = TestContext::new();
    let user = ctx.add_user(KODY_EMAIL, "kody").await;
    let session = ctx
        .state
        .sessions
        .session_cookie(&SessionContext::for_user(user.id))
        .unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let mut form: Vec<(&str, &str)> = COMPANY_FORM.to_vec();
    form.push(("redirectTo", "//evil.example.com"));
    let req = test::TestRequest::post()
        .uri("/onboarding/company")
        .cookie(session)
        .set_form(form)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn test_company_missing_fields_are_reported() {
    let ctx = TestContext::new();
    let user = ctx.add_user(KODY_EMAIL, "kody").await;
    let session = ctx
        .state
        .sessions
        .session_cookie(&SessionContext::for_user(user.id))
        .unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/onboarding/company")
        .cookie(session)
        .set_form([("name", "Kody's Keeps")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let errors = &body["submission"]["error"];
    assert!(errors["addressLine1"].is_array());
    assert!(errors["zipCode"].is_array());
    assert!(errors.get("name").is_none());
}

#[actix_web::test]
async fn test_company_for_deleted_user_is_404() {
    let ctx = TestContext::new();
    let session = ctx
        .state
        .sessions
        .session_cookie(&SessionContext::for_user(uuid::Uuid::new_v4()))
        .unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/onboarding/company")
        .cookie(session)
        .set_form(COMPANY_FORM)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
