//! Route handlers
//!
//! - `account` - signup, forgot password and verification
//! - `onboarding` - onboarding index and company creation
//! - `notes` - notes index metadata

pub mod account;
pub mod notes;
pub mod onboarding;
