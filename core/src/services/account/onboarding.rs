//! Signup and company onboarding flows

use std::sync::Arc;

use nk_shared::utils::{mask_email, safe_redirect};

use crate::domain::entities::user::{Address, Company, Role, DEFAULT_COUNTRY};
use crate::domain::entities::verification::VerificationType;
use crate::domain::value_objects::{SessionContext, Toast};
use crate::errors::{DomainError, DomainResult};
use crate::forms::{CompanyForm, FormData, SignupForm, Submission};
use crate::repositories::{UserRepository, VerificationRepository};
use crate::services::email::{templates::onboarding_email, EmailSender};
use crate::services::verification::VerificationService;

use super::outcome::{FormOutcome, Redirect};

pub const USER_EXISTS_MESSAGE: &str = "A user already exists with this email";

/// Where `/onboarding` sends the user
pub const ONBOARDING_PROFILE_PATH: &str = "/onboarding/profile";

/// Location of the onboarding index page
pub fn onboarding_index() -> Redirect {
    Redirect::to(ONBOARDING_PROFILE_PATH)
}

pub struct OnboardingService<U, R, E>
where
    U: UserRepository,
    R: VerificationRepository,
    E: EmailSender,
{
    users: Arc<U>,
    verification: Arc<VerificationService<R>>,
    email: Arc<E>,
}

impl<U, R, E> OnboardingService<U, R, E>
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

    /// Handle a signup submission by emailing an onboarding verification
    pub async fn request_signup(&self, form: &FormData) -> DomainResult<FormOutcome<SignupForm>> {
        let submission = Submission::<SignupForm>::parse(form);
        if !submission.is_submit() {
            return Ok(FormOutcome::Idle(submission));
        }
        let Some(value) = submission.value.clone() else {
            return Ok(FormOutcome::Invalid(submission));
        };

        if self.users.find_by_email(&value.email).await?.is_some() {
            return Ok(FormOutcome::Invalid(
                submission.with_field_error("email", USER_EXISTS_MESSAGE),
            ));
        }

        let issued = self
            .verification
            .prepare_verification(&value.email, VerificationType::Onboarding)
            .await?;

        let message =
            onboarding_email(&value.email, &issued.code, issued.redemption_url.as_str())?;
        match self.email.send(&message).await {
            Ok(message_id) => {
                tracing::info!(
                    recipient = %mask_email(&value.email),
                    message_id = %message_id,
                    event = "onboarding_email_sent",
                    "Sent onboarding email"
                );
                Ok(FormOutcome::Redirect(Redirect::to(issued.redirect_to.to_string())))
            }
            Err(error) => {
                tracing::error!(
                    recipient = %mask_email(&value.email),
                    error = %error,
                    event = "onboarding_email_failed",
                    "Failed to send onboarding email"
                );
                Ok(FormOutcome::Failed(submission.with_form_error(error)))
            }
        }
    }

    /// Create the signed-in user's company and make them its admin
    ///
    /// Fails with `DomainError::Unauthorized` without a signed-in user.
    pub async fn create_company(
        &self,
        ctx: &SessionContext,
        form: &FormData,
    ) -> DomainResult<FormOutcome<CompanyForm>> {
        let user_id = ctx.user_id.ok_or(DomainError::Unauthorized)?;

        let submission = Submission::<CompanyForm>::parse(form);
        if !submission.is_submit() {
            return Ok(FormOutcome::Idle(submission));
        }
        let Some(value) = submission.value.clone() else {
            return Ok(FormOutcome::Invalid(submission));
        };

        let company = Company::new(
            value.name,
            Address {
                line1: value.address_line1,
                line2: value.address_line2,
                city: value.city,
                state: value.state,
                zip_code: value.zip_code,
                country: DEFAULT_COUNTRY.to_string(),
            },
        );
        let company_id = company.id;
        self.users
            .attach_company(user_id, company, Role::Admin)
            .await?;

        tracing::info!(
            user_id = %user_id,
            company_id = %company_id,
            event = "company_onboarded",
            "Created company during onboarding"
        );

        Ok(FormOutcome::Redirect(
            Redirect::to(safe_redirect(value.redirect_to.as_deref()))
                .with_toast(Toast::new("Welcome", "Thanks for signing up!")),
        ))
    }
}
