//! # Notekeep API
//!
//! actix-web surface over the account, onboarding and notes flows of
//! `nk_core`. Session state travels in signed cookies and is handed to the
//! core services as explicit arguments.

pub mod app;
pub mod handlers;
pub mod routes;
pub mod session;
pub mod telemetry;

pub use app::{create_app, AppState};
pub use session::SessionKeys;
