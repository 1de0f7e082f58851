//! JSON error body for non-form endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body returned when a request fails outside a form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable code from [`error_codes`]
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const EMAIL_ERROR: &str = "EMAIL_ERROR";
    pub const VERIFICATION_FAILED: &str = "VERIFICATION_FAILED";
}

/// Errors that know their client-facing body
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_serializes_code_and_message() {
        let json = serde_json::to_value(ErrorResponse::new(error_codes::NOT_FOUND, "Missing"))
            .expect("serialize");
        assert_eq!(json["error"], "NOT_FOUND");
        assert_eq!(json["message"], "Missing");
        assert!(json["timestamp"].is_string());
    }
}
