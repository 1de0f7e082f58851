//! Account page actions: signup, password recovery, verification and
//! company onboarding
//!
//! Each action takes the submitted [`FormData`](crate::forms::FormData) and
//! any session context explicitly and returns a [`FormOutcome`].

mod onboarding;
mod outcome;
mod password_reset;
mod verify;

#[cfg(test)]
mod tests;

pub use onboarding::{
    onboarding_index, OnboardingService, ONBOARDING_PROFILE_PATH, USER_EXISTS_MESSAGE,
};
pub use outcome::{FormOutcome, Redirect};
pub use password_reset::{PasswordResetService, NO_USER_MESSAGE};
pub use verify::{VerifyService, ONBOARDING_PATH, RESET_PASSWORD_PATH};
