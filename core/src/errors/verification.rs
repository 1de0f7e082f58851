//! Errors of the verification handshake

use thiserror::Error;

/// Message shown to users for every failed redemption
pub const GENERIC_VERIFICATION_MESSAGE: &str = "Invalid or expired verification code";

/// Failures of issuing or redeeming a verification
///
/// `NotFound`, `Expired` and `Mismatch` are kept apart for logs and tests but
/// render the same [`user_message`](VerificationError::user_message).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Invalid verification input: {message}")]
    InvalidInput { message: String },

    #[error("Verification storage failure: {message}")]
    StorageFailure { message: String },

    #[error("Verification not found")]
    NotFound,

    #[error("Verification code expired")]
    Expired,

    #[error("Verification code mismatch")]
    Mismatch,
}

impl VerificationError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        VerificationError::InvalidInput {
            message: message.into(),
        }
    }

    /// True for the failures a user may cause by submitting a bad code
    pub fn is_redemption_failure(&self) -> bool {
        matches!(
            self,
            VerificationError::NotFound | VerificationError::Expired | VerificationError::Mismatch
        )
    }

    /// Text safe to show to the end user
    pub fn user_message(&self) -> String {
        match self {
            VerificationError::NotFound
            | VerificationError::Expired
            | VerificationError::Mismatch => GENERIC_VERIFICATION_MESSAGE.to_string(),
            VerificationError::InvalidInput { message } => message.clone(),
            VerificationError::StorageFailure { .. } => {
                "Something went wrong, please try again".to_string()
            }
        }
    }
}
