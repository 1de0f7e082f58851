//! Per-request session context.
//!
//! Handlers receive these values explicitly and return updated copies; the
//! HTTP layer is responsible for reading and writing them as signed cookies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// State carried between a successful verification and the page that
/// consumes it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifySession {
    /// Email confirmed through an onboarding verification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_email: Option<String>,

    /// Username allowed to choose a new password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_password_username: Option<String>,
}

impl VerifySession {
    pub fn is_empty(&self) -> bool {
        self.onboarding_email.is_none() && self.reset_password_username.is_none()
    }
}

/// Authenticated user, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_session_serializes_only_set_keys() {
        let session = VerifySession {
            onboarding_email: Some("kody@example.com".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json, serde_json::json!({ "onboardingEmail": "kody@example.com" }));
        assert!(!session.is_empty());
        assert!(VerifySession::default().is_empty());
    }
}
