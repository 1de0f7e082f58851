//! Results of form-handling flows

use crate::domain::value_objects::{Toast, VerifySession};
use crate::forms::Submission;

/// What a page action decided to do with a submitted form
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome<T> {
    /// The form was submitted for another intent; echo it back
    Idle(Submission<T>),
    /// The form failed validation or a business rule
    Invalid(Submission<T>),
    /// The form was valid but a downstream step failed
    Failed(Submission<T>),
    /// Continue on another page
    Redirect(Redirect),
}

impl<T> FormOutcome<T> {
    pub fn is_redirect(&self) -> bool {
        matches!(self, FormOutcome::Redirect(_))
    }

    pub fn submission(&self) -> Option<&Submission<T>> {
        match self {
            FormOutcome::Idle(s) | FormOutcome::Invalid(s) | FormOutcome::Failed(s) => Some(s),
            FormOutcome::Redirect(_) => None,
        }
    }
}

/// A redirect plus the state to hand to the next page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub toast: Option<Toast>,
    /// Replacement for the verify session cookie, when it changed
    pub verify_session: Option<VerifySession>,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            toast: None,
            verify_session: None,
        }
    }

    pub fn with_toast(mut self, toast: Toast) -> Self {
        self.toast = Some(toast);
        self
    }

    pub fn with_verify_session(mut self, session: VerifySession) -> Self {
        self.verify_session = Some(session);
        self
    }
}
