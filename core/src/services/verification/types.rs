//! Types for verification service results

use chrono::{DateTime, Utc};
use url::Url;

use crate::domain::entities::verification::VerificationType;

/// Result of issuing a verification, handed to the delivery step
#[derive(Debug, Clone)]
pub struct IssuedVerification {
    pub target: String,
    pub verification_type: VerificationType,
    /// Short code for manual entry
    pub code: String,
    /// Link that redeems the verification directly
    pub redemption_url: Url,
    /// Page where the user types the code
    pub redirect_to: Url,
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful redemption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemedVerification {
    pub target: String,
    pub verification_type: VerificationType,
}
