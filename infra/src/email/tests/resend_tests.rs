use nk_core::services::email::templates::forgot_password_email;
use nk_core::services::email::EmailSender;
use nk_shared::config::EmailConfig;
use reqwest::StatusCode;

use crate::email::resend::is_retryable_status;
use crate::email::{ResendConfig, ResendEmailService};

fn service(api_url: &str) -> ResendEmailService {
    let config = EmailConfig {
        provider: "resend".to_string(),
        api_key: "re_test_key".to_string(),
        api_url: api_url.to_string(),
        timeout_secs: 2,
        ..EmailConfig::default()
    };
    let mut resend = ResendConfig::from_email_config(&config).unwrap();
    resend.retry_delay_ms = 1;
    ResendEmailService::new(resend).unwrap()
}

#[test]
fn test_request_body_shape() {
    let service = service("https://api.resend.com/emails");
    let message =
        forgot_password_email("kody@example.com", "123456", "https://notekeep.dev/verify").unwrap();

    let body = serde_json::to_value(service.request_body(&message)).unwrap();
    assert_eq!(body["from"], "hello@notekeep.dev");
    assert_eq!(body["to"], serde_json::json!(["kody@example.com"]));
    assert_eq!(body["subject"], "Notekeep Password Reset");
    assert!(body["html"].as_str().unwrap().contains("123456"));
}

#[test]
fn test_config_requires_api_key() {
    let config = EmailConfig {
        provider: "resend".to_string(),
        ..EmailConfig::default()
    };
    assert!(ResendConfig::from_email_config(&config).is_err());
}

#[test]
fn test_retryable_statuses() {
    assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
    assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
    assert!(!is_retryable_status(StatusCode::UNPROCESSABLE_ENTITY));
    assert!(!is_retryable_status(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn test_unreachable_provider_reports_error() {
    // nothing listens on port 9 of localhost
    let service = service("http://127.0.0.1:9/emails");
    let message =
        forgot_password_email("kody@example.com", "123456", "https://notekeep.dev/verify").unwrap();

    let result = service.send(&message).await;
    assert!(result.unwrap_err().starts_with("Email request failed"));
}
