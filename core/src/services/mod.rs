//! Business services containing domain logic and use cases.

pub mod account;
pub mod clock;
pub mod email;
pub mod notes;
pub mod verification;

// Re-export commonly used types
pub use account::{
    FormOutcome, OnboardingService, PasswordResetService, Redirect, VerifyService,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use email::{EmailMessage, EmailSender};
pub use notes::{notes_index_meta, NotesService, PageMeta};
pub use verification::{
    IssuedVerification, RedeemedVerification, VerificationCleanupService, VerificationService,
    VerificationServiceConfig,
};
