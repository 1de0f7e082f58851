//! Common utility functions

pub mod mask;
pub mod redirect;
pub mod validation;

pub use mask::mask_email;
pub use redirect::safe_redirect;
pub use validation::FieldErrors;
