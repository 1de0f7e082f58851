//! # Infrastructure Layer
//!
//! Concrete implementations of the Notekeep core's collaborators:
//!
//! - **Database**: MySQL repositories for verifications and users using SQLx
//! - **Cache**: Redis-backed verification store with native key expiry
//! - **Email**: outbound email providers (mock and an HTTP API)
//! - **Stores**: backend selection from [`AppConfig`](nk_shared::AppConfig)

use nk_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and verification store
pub mod cache;

/// Email delivery providers
pub mod email;

/// Storage backend selection
pub mod stores;

pub use email::{create_email_service, EmailService};
pub use stores::{build_stores, Stores, UserStore, VerificationStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stored data could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email provider rejected a message
    #[error("Email service error: {0}")]
    Email(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Email(message) => DomainError::Delivery { message },
            InfrastructureError::Config(message) => DomainError::Internal { message },
            other => DomainError::Storage {
                message: other.to_string(),
            },
        }
    }
}
