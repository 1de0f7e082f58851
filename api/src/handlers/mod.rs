//! Response building shared by the route handlers

pub mod error;
pub mod outcome;

pub use error::ApiError;
pub use outcome::{form_response, redirect_response};
