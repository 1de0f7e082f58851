//! Forgot-password flow

use std::sync::Arc;

use nk_shared::utils::mask_email;

use crate::domain::entities::verification::VerificationType;
use crate::errors::DomainResult;
use crate::forms::{ForgotPasswordForm, FormData, Submission};
use crate::repositories::{UserRepository, VerificationRepository};
use crate::services::email::{templates::forgot_password_email, EmailSender};
use crate::services::verification::VerificationService;

use super::outcome::{FormOutcome, Redirect};

pub const NO_USER_MESSAGE: &str = "No user exists with this email";

/// Sends password reset codes
pub struct PasswordResetService<U, R, E>
where
    U: UserRepository,
    R: VerificationRepository,
    E: EmailSender,
{
    users: Arc<U>,
    verification: Arc<VerificationService<R>>,
    email: Arc<E>,
}

impl<U, R, E> PasswordResetService<U, R, E>
where
    U: UserRepository,
    R: VerificationRepository,
    E: EmailSender,
{
    pub fn new(users: Arc<U>, verification: Arc<VerificationService<R>>, email: Arc<E>) -> Self {
        Self {
            users,
            verification,
            email,
        }
    }

    /// Handle a forgot-password submission
    ///
    /// A valid form for a registered email issues a reset verification,
    /// emails it, and redirects to the code entry page. Delivery failures
    /// come back as a form-level error.
    pub async fn request_reset(
        &self,
        form: &FormData,
    ) -> DomainResult<FormOutcome<ForgotPasswordForm>> {
        let submission = Submission::<ForgotPasswordForm>::parse(form);
        if !submission.is_submit() {
            return Ok(FormOutcome::Idle(submission));
        }
        let Some(value) = submission.value.clone() else {
            return Ok(FormOutcome::Invalid(submission));
        };

        let Some(user) = self.users.find_by_email(&value.user_email).await? else {
            tracing::info!(
                recipient = %mask_email(&value.user_email),
                event = "password_reset_unknown_user",
                "Password reset requested for unknown email"
            );
            return Ok(FormOutcome::Invalid(
                submission.with_field_error("userEmail", NO_USER_MESSAGE),
            ));
        };

        let issued = self
            .verification
            .prepare_verification(&value.user_email, VerificationType::ResetPassword)
            .await?;

        let message =
            forgot_password_email(&user.email, &issued.code, issued.redemption_url.as_str())?;
        match self.email.send(&message).await {
            Ok(message_id) => {
                tracing::info!(
                    recipient = %mask_email(&user.email),
                    provider = self.email.provider_name(),
                    message_id = %message_id,
                    event = "password_reset_email_sent",
                    "Sent password reset email"
                );
                Ok(FormOutcome::Redirect(Redirect::to(issued.redirect_to.to_string())))
            }
            Err(error) => {
                tracing::error!(
                    recipient = %mask_email(&user.email),
                    provider = self.email.provider_name(),
                    error = %error,
                    event = "password_reset_email_failed",
                    "Failed to send password reset email"
                );
                Ok(FormOutcome::Failed(submission.with_form_error(error)))
            }
        }
    }
}
