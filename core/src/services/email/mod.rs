//! Outbound email capability
//!
//! The core only knows how to compose messages; delivery is provided by an
//! [`EmailSender`] implementation from the infrastructure layer.

pub mod templates;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A fully rendered email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Trait for email delivery integration
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send a message, returning the provider's message id
    ///
    /// The error string is shown to the user as a form-level error.
    async fn send(&self, message: &EmailMessage) -> Result<String, String>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}
