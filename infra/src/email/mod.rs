//! Email delivery providers
//!
//! - **Mock**: logs messages, for development and tests
//! - **Resend**: HTTP API delivery via `reqwest`
//!
//! [`create_email_service`] picks one from [`EmailConfig`].

pub mod mock;
pub mod resend;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

use nk_core::services::email::{EmailMessage, EmailSender};
use nk_shared::config::EmailConfig;

pub use mock::MockEmailService;
pub use resend::{ResendConfig, ResendEmailService};

/// The configured email provider
pub enum EmailService {
    Mock(MockEmailService),
    Resend(ResendEmailService),
}

#[async_trait]
impl EmailSender for EmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        match self {
            EmailService::Mock(service) => service.send(message).await,
            EmailService::Resend(service) => service.send(message).await,
        }
    }

    fn provider_name(&self) -> &str {
        match self {
            EmailService::Mock(service) => service.provider_name(),
            EmailService::Resend(service) => service.provider_name(),
        }
    }
}

/// Create the email service named by `config.provider`
///
/// Unknown providers, and a Resend provider that cannot be initialised,
/// fall back to the mock service with a warning.
pub fn create_email_service(config: &EmailConfig) -> EmailService {
    match config.provider.as_str() {
        "mock" => EmailService::Mock(MockEmailService::new()),
        "resend" => {
            match ResendConfig::from_email_config(config).and_then(ResendEmailService::new) {
                Ok(service) => EmailService::Resend(service),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to initialize Resend email service");
                    tracing::warn!("Falling back to mock email service");
                    EmailService::Mock(MockEmailService::new())
                }
            }
        }
        other => {
            tracing::warn!(
                provider = other,
                "Unknown email provider, using mock implementation"
            );
            EmailService::Mock(MockEmailService::new())
        }
    }
}
