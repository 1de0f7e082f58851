//! Mock email service for development and testing
//!
//! Logs each message instead of sending it, so the code and link can be
//! read from the server log during local development.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use nk_core::services::email::{EmailMessage, EmailSender};
use nk_shared::utils::mask_email;

#[derive(Clone, Default)]
pub struct MockEmailService {
    /// Number of messages accepted
    message_count: Arc<AtomicU64>,
    /// Reject every message when set
    simulate_failure: bool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that rejects every message
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailSender for MockEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        if self.simulate_failure {
            warn!(
                provider = "mock",
                recipient = %mask_email(&message.to),
                "Mock email service simulating failure"
            );
            return Err("Simulated email sending failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            provider = "mock",
            recipient = %mask_email(&message.to),
            message_id = %message_id,
            count,
            subject = %message.subject,
            body = %message.text,
            "Mock email sent"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
