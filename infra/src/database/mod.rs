//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and migrations
//! - Verification record and user repositories

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlUserRepository, MySqlVerificationRepository};

use nk_core::errors::DomainError;

/// Map a query failure to a storage error, keeping the operation name
pub(crate) fn query_error(operation: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(operation, error = %error, "Database query failed");
    DomainError::storage(format!("Failed to {}: {}", operation, error))
}
