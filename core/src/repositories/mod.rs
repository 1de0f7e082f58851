pub mod user;
pub mod verification;

pub use user::{InMemoryUserRepository, UserRepository};
pub use verification::{InMemoryVerificationRepository, VerificationRepository};
