//! Verify page: redeems a code and hands off to the flow it belongs to

use std::sync::Arc;

use nk_shared::utils::mask_email;

use crate::domain::entities::verification::VerificationType;
use crate::domain::value_objects::VerifySession;
use crate::errors::{DomainResult, VerificationError, GENERIC_VERIFICATION_MESSAGE};
use crate::forms::{FormData, Submission, VerifyForm};
use crate::repositories::{UserRepository, VerificationRepository};
use crate::services::verification::{RedeemedVerification, VerificationService};

use super::outcome::{FormOutcome, Redirect};

pub const ONBOARDING_PATH: &str = "/onboarding";
pub const RESET_PASSWORD_PATH: &str = "/reset-password";

pub struct VerifyService<U, R>
where
    U: UserRepository,
    R: VerificationRepository,
{
    users: Arc<U>,
    verification: Arc<VerificationService<R>>,
}

impl<U, R> VerifyService<U, R>
where
    U: UserRepository,
    R: VerificationRepository,
{
    pub fn new(users: Arc<U>, verification: Arc<VerificationService<R>>) -> Self {
        Self {
            users,
            verification,
        }
    }

    /// Handle a verify form submission
    ///
    /// The session is taken by value; a successful redemption returns the
    /// updated session inside the redirect.
    pub async fn verify(
        &self,
        form: &FormData,
        session: VerifySession,
    ) -> DomainResult<FormOutcome<VerifyForm>> {
        let submission = Submission::<VerifyForm>::parse(form);
        if !submission.is_submit() {
            return Ok(FormOutcome::Idle(submission));
        }
        let Some(value) = submission.value.clone() else {
            return Ok(FormOutcome::Invalid(submission));
        };

        let redeemed = match self
            .verification
            .redeem(&value.target, value.verification_type, &value.code)
            .await
        {
            Ok(redeemed) => redeemed,
            Err(VerificationError::StorageFailure { message }) => {
                return Err(VerificationError::StorageFailure { message }.into());
            }
            Err(_) => return Ok(invalid_code(submission)),
        };

        self.complete(redeemed, submission, session).await
    }

    /// Handle a visit to a verification link
    ///
    /// Without a `code` in the query there is nothing to redeem yet and the
    /// empty form is returned for manual entry.
    pub async fn verify_link(
        &self,
        query: &FormData,
        session: VerifySession,
    ) -> DomainResult<FormOutcome<VerifyForm>> {
        if query.get("code").is_none() {
            let mut submission = Submission::<VerifyForm>::parse(query);
            submission.errors = Default::default();
            return Ok(FormOutcome::Idle(submission));
        }
        self.verify(query, session).await
    }

    async fn complete(
        &self,
        redeemed: RedeemedVerification,
        submission: Submission<VerifyForm>,
        mut session: VerifySession,
    ) -> DomainResult<FormOutcome<VerifyForm>> {
        match redeemed.verification_type {
            VerificationType::Onboarding => {
                session.onboarding_email = Some(redeemed.target);
                Ok(FormOutcome::Redirect(
                    Redirect::to(ONBOARDING_PATH).with_verify_session(session),
                ))
            }
            VerificationType::ResetPassword => {
                let Some(user) = self.users.find_by_email(&redeemed.target).await? else {
                    tracing::warn!(
                        recipient = %mask_email(&redeemed.target),
                        event = "reset_password_user_missing",
                        "Verified password reset for an email with no user"
                    );
                    return Ok(invalid_code(submission));
                };
                session.reset_password_username = Some(user.username);
                Ok(FormOutcome::Redirect(
                    Redirect::to(RESET_PASSWORD_PATH).with_verify_session(session),
                ))
            }
        }
    }
}

fn invalid_code(submission: Submission<VerifyForm>) -> FormOutcome<VerifyForm> {
    FormOutcome::Invalid(submission.with_field_error("code", GENERIC_VERIFICATION_MESSAGE))
}
