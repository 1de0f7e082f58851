//! Value objects representing immutable domain concepts.

pub mod session;
pub mod toast;

// Re-export commonly used types
pub use session::{SessionContext, VerifySession};
pub use toast::Toast;
