//! Email verification handshake
//!
//! This module provides the one-time code workflow:
//! - issuing a short code plus a redemption link and storing an expiring record
//! - redeeming a code or link secret exactly once
//! - sweeping expired records in the background

mod cleanup;
mod config;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::VerificationCleanupService;
pub use config::{VerificationServiceConfig, DEFAULT_PERIOD_SECONDS, DEFAULT_VERIFY_PATH};
pub use service::VerificationService;
pub use types::{IssuedVerification, RedeemedVerification};
