//! Field-level validation errors shared by form parsing and API responses

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key used for errors that belong to the whole form rather than one field
pub const FORM_ERROR_KEY: &str = "";

/// Validation messages keyed by field name
///
/// Serializes as `{"field": ["message", ...]}`; form-level messages live under
/// the empty key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors with a single field message
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Errors with a single form-level message
    pub fn form(message: impl Into<String>) -> Self {
        Self::single(FORM_ERROR_KEY, message)
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn add_form_error(&mut self, message: impl Into<String>) {
        self.add(FORM_ERROR_KEY, message);
    }

    /// Append every message from `other`
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn form_errors(&self) -> Option<&[String]> {
        self.get(FORM_ERROR_KEY)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(value)` when no error was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}
