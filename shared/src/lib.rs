//! Shared utilities and common types for the Notekeep server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Field-level validation errors
//! - Log masking and redirect helpers

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, EmailConfig, Environment, LogFormat, LoggingConfig,
    ServerConfig, SessionConfig, StorageBackend, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::{mask, redirect, validation};
pub use utils::redirect::safe_redirect;
pub use utils::validation::FieldErrors;
