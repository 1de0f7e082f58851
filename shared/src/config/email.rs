//! Outbound email configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider name ("mock" or "resend")
    pub provider: String,

    /// API key for the HTTP provider
    #[serde(default)]
    pub api_key: String,

    /// Sender address
    pub from: String,

    /// Endpoint of the provider's send API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_key: String::new(),
            from: String::from("hello@notekeep.dev"),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmailConfig {
    /// Override fields from `EMAIL_PROVIDER`, `EMAIL_API_KEY`, `EMAIL_FROM`
    /// and `EMAIL_API_URL`
    pub fn from_env_or(fallback: Self) -> Self {
        Self {
            provider: env_or("EMAIL_PROVIDER", fallback.provider),
            api_key: env_or("EMAIL_API_KEY", fallback.api_key),
            from: env_or("EMAIL_FROM", fallback.from),
            api_url: env_or("EMAIL_API_URL", fallback.api_url),
            timeout_secs: fallback.timeout_secs,
        }
    }
}

fn default_api_url() -> String {
    String::from("https://api.resend.com/emails")
}

fn default_timeout_secs() -> u64 {
    30
}
