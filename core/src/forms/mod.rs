//! Form schemas and submission parsing.
//!
//! Each form implements [`FormSchema`], turning raw submitted fields into a
//! typed value or a set of [`FieldErrors`]. [`Submission`] wraps the result
//! together with the intent and the raw payload so a failed form can be
//! echoed back to the client.

pub mod auth;
pub mod fields;
pub mod onboarding;

use std::collections::BTreeMap;

use nk_shared::FieldErrors;
use serde::{Deserialize, Serialize};

pub use auth::{ForgotPasswordForm, SignupForm, VerifyForm};
pub use onboarding::CompanyForm;

/// Hidden field naming the button that submitted the form
pub const INTENT_FIELD: &str = "__intent__";

/// Intent of a regular submit
pub const SUBMIT_INTENT: &str = "submit";

/// Raw submitted fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Value of a field; empty strings count as missing
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn intent(&self) -> &str {
        self.get(INTENT_FIELD).unwrap_or(SUBMIT_INTENT)
    }

    /// Submitted fields without the intent marker
    pub fn payload(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .filter(|(field, _)| field.as_str() != INTENT_FIELD)
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

/// A typed form
pub trait FormSchema: Sized {
    fn parse(form: &FormData) -> Result<Self, FieldErrors>;
}

/// Result of parsing one submitted form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission<T> {
    pub intent: String,

    /// Raw fields as submitted
    pub payload: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,

    #[serde(rename = "error")]
    pub errors: FieldErrors,
}

impl<T: FormSchema> Submission<T> {
    /// Parse `form` with the schema of `T`
    pub fn parse(form: &FormData) -> Self {
        let (value, errors) = match T::parse(form) {
            Ok(value) => (Some(value), FieldErrors::new()),
            Err(errors) => (None, errors),
        };

        Self {
            intent: form.intent().to_string(),
            payload: form.payload(),
            value,
            errors,
        }
    }
}

impl<T> Submission<T> {
    pub fn is_submit(&self) -> bool {
        self.intent == SUBMIT_INTENT
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_some() && self.errors.is_empty()
    }

    /// Record an error on one field
    pub fn with_field_error(mut self, field: &str, message: impl Into<String>) -> Self {
        self.errors.add(field, message);
        self
    }

    /// Record an error that belongs to the whole form
    pub fn with_form_error(mut self, message: impl Into<String>) -> Self {
        self.errors.add_form_error(message);
        self
    }
}

/// Convert `validator` errors to field errors keyed by form field name
pub fn field_errors_from(errors: &validator::ValidationErrors) -> FieldErrors {
    let mut field_errors = FieldErrors::new();
    for (field, errors) in errors.field_errors() {
        for error in errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            field_errors.add(to_camel_case(&field), message);
        }
    }
    field_errors
}

/// `address_line1` -> `addressLine1`
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_data_treats_empty_as_missing() {
        let form = FormData::new().with("name", "").with("city", "Provo");
        assert_eq!(form.get("name"), None);
        assert_eq!(form.get("city"), Some("Provo"));
        assert_eq!(form.get("state"), None);
    }

    #[test]
    fn test_intent_defaults_to_submit() {
        let form = FormData::new();
        assert_eq!(form.intent(), SUBMIT_INTENT);

        let form = form.with(INTENT_FIELD, "validate/userEmail");
        assert_eq!(form.intent(), "validate/userEmail");
        assert!(!form.payload().contains_key(INTENT_FIELD));
    }

    #[test]
    fn test_submission_serializes_like_a_form_state() {
        let form = FormData::new().with("userEmail", "nope");
        let submission: Submission<ForgotPasswordForm> = Submission::parse(&form);

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["intent"], "submit");
        assert_eq!(json["payload"]["userEmail"], "nope");
        assert_eq!(json["error"]["userEmail"][0], "Email is invalid");
        assert!(json.get("value").is_none());
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("address_line1"), "addressLine1");
        assert_eq!(to_camel_case("zip_code"), "zipCode");
        assert_eq!(to_camel_case("name"), "name");
    }
}
