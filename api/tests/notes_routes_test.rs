mod common;

use actix_web::{http::StatusCode, test};

use nk_api::create_app;
use nk_core::domain::entities::user::User;
use nk_core::repositories::UserRepository;

use common::{TestContext, KODY_EMAIL};

#[actix_web::test]
async fn test_notes_meta_uses_display_name_and_count() {
    let ctx = TestContext::new();
    let user = ctx
        .users
        .create(User::new(KODY_EMAIL, "kody").with_name("Kody"))
        .await
        .unwrap();
    ctx.users.set_note_count(user.id, 3).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/users/kody/notes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Kody's Notes | Notekeep");
    assert_eq!(body["description"], "Checkout Kody's 3 notes on Notekeep");
}

#[actix_web::test]
async fn test_notes_meta_for_single_note_without_name() {
    let ctx = TestContext::new();
    let user = ctx.add_user(KODY_EMAIL, "kody").await;
    ctx.users.set_note_count(user.id, 1).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/users/kody/notes").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["title"], "kody's Notes | Notekeep");
    assert_eq!(body["description"], "Checkout kody's 1 note on Notekeep");
}

#[actix_web::test]
async fn test_notes_for_unknown_user_is_404() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/users/nobody/notes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
