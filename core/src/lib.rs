//! # Notekeep Core
//!
//! Core business logic and domain layer for the Notekeep backend.
//! This crate contains domain entities, form schemas, business services,
//! repository interfaces and error types. The email verification handshake
//! lives in [`services::verification`].

pub mod domain;
pub mod errors;
pub mod forms;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
