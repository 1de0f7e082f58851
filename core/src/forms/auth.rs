//! Forms of the signup, password recovery and verification pages.

use nk_shared::FieldErrors;
use serde::Serialize;

use super::{fields, FormData, FormSchema};
use crate::domain::entities::VerificationType;

/// `POST /forgot-password`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordForm {
    pub user_email: String,
}

impl FormSchema for ForgotPasswordForm {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let user_email = fields::email(form, "userEmail", &mut errors);

        match user_email {
            Some(user_email) => errors.into_result(Self { user_email }),
            None => Err(errors),
        }
    }
}

/// `POST /signup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupForm {
    pub email: String,
}

impl FormSchema for SignupForm {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        match fields::email(form, "email", &mut errors) {
            Some(email) => errors.into_result(Self { email }),
            None => Err(errors),
        }
    }
}

/// `GET|POST /verify`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyForm {
    /// Short code or link secret
    pub code: String,

    #[serde(rename = "type")]
    pub verification_type: VerificationType,

    pub target: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl FormSchema for VerifyForm {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let code = fields::required(form, "code", &mut errors);
        let target = fields::required(form, "target", &mut errors);
        let verification_type = match form.get("type") {
            Some(tag) => match tag.parse::<VerificationType>() {
                Ok(verification_type) => Some(verification_type),
                Err(_) => {
                    errors.add("type", "Invalid verification type");
                    None
                }
            },
            None => {
                errors.add("type", fields::REQUIRED_MESSAGE);
                None
            }
        };
        let redirect_to = fields::optional(form, "redirectTo");

        match (code, verification_type, target) {
            (Some(code), Some(verification_type), Some(target)) => errors.into_result(Self {
                code: code.trim().to_string(),
                verification_type,
                target,
                redirect_to,
            }),
            _ => Err(errors),
        }
    }
}
