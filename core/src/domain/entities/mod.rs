//! Domain entities representing core business objects.

pub mod user;
pub mod verification;

// Re-export commonly used types
pub use user::{Address, Company, NoteOwner, Role, User, DEFAULT_COUNTRY};
pub use verification::{
    generate_code, generate_secret, hash_secret, VerificationRecord, VerificationType,
    CODE_LENGTH, SECRET_BYTES,
};
