//! HTTP email provider speaking the Resend send API
//!
//! `POST {api_url}` with a bearer key and a JSON body
//! `{ from, to: [..], subject, html, text }`; the response carries the
//! message `id`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use nk_core::services::email::{EmailMessage, EmailSender};
use nk_shared::config::EmailConfig;
use nk_shared::utils::mask_email;

use crate::InfrastructureError;

/// Resend client settings
#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    pub from: String,
    pub api_url: String,
    /// Maximum attempts for retryable failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl ResendConfig {
    pub fn from_email_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_API_KEY must be set for the resend provider".to_string(),
            ));
        }
        Ok(Self {
            api_key: config.api_key.clone(),
            from: config.from.clone(),
            api_url: config.api_url.clone(),
            max_retries: 3,
            retry_delay_ms: 500,
            request_timeout_secs: config.timeout_secs,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SendEmailRequest<'a> {
    pub from: &'a str,
    pub to: [&'a str; 1],
    pub subject: &'a str,
    pub html: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

pub struct ResendEmailService {
    client: reqwest::Client,
    config: ResendConfig,
}

impl ResendEmailService {
    pub fn new(config: ResendConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(from = %mask_email(&config.from), "Resend email service initialized");

        Ok(Self { client, config })
    }

    pub(crate) fn request_body<'a>(&'a self, message: &'a EmailMessage) -> SendEmailRequest<'a> {
        SendEmailRequest {
            from: &self.config.from,
            to: [message.to.as_str()],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        }
    }

    async fn send_once(&self, message: &EmailMessage) -> Result<String, SendFailure> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(message))
            .send()
            .await
            .map_err(|e| SendFailure {
                retryable: e.is_timeout() || e.is_connect(),
                message: format!("Email request failed: {}", e),
            })?;

        let status = response.status();
        if status.is_success() {
            let body: SendEmailResponse = response.json().await.map_err(|e| SendFailure {
                retryable: false,
                message: format!("Unexpected email provider response: {}", e),
            })?;
            return Ok(body.id);
        }

        let detail = match response.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => status.to_string(),
        };
        Err(SendFailure {
            retryable: is_retryable_status(status),
            message: format!("Email provider rejected the message: {}", detail),
        })
    }

    async fn send_with_retry(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(
                "Sending email attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_email(&message.to)
            );

            match self.send_once(message).await {
                Ok(id) => return Ok(id),
                Err(failure) if failure.retryable && attempts < self.config.max_retries => {
                    warn!(
                        "Email send failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempts, self.config.max_retries, failure.message, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(failure) => {
                    error!(
                        recipient = %mask_email(&message.to),
                        attempts,
                        error = %failure.message,
                        "Failed to send email"
                    );
                    return Err(InfrastructureError::Email(failure.message));
                }
            }
        }
    }
}

struct SendFailure {
    retryable: bool,
    message: String,
}

pub(crate) fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl EmailSender for ResendEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        let id = self
            .send_with_retry(message)
            .await
            .map_err(|e| match e {
                InfrastructureError::Email(message) => message,
                other => other.to_string(),
            })?;

        info!(
            provider = "resend",
            recipient = %mask_email(&message.to),
            message_id = %id,
            "Email sent"
        );
        Ok(id)
    }

    fn provider_name(&self) -> &str {
        "resend"
    }
}
