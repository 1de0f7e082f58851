//! MySQL repository implementations

mod user_repository;
mod verification_repository;

pub use user_repository::MySqlUserRepository;
pub use verification_repository::MySqlVerificationRepository;
