//! Reusable field schemas shared by several forms.
//!
//! Each function reads one field, records every failed rule in `errors`
//! and returns the transformed value only when all rules pass.
//!
//! `password`, `name` and `password_and_confirm` have no form in this
//! service. They are exported for the login, profile and reset-password
//! pages, which are served elsewhere, so those pages share these rules.

use nk_shared::FieldErrors;
use validator::ValidateEmail;

use super::FormData;

/// Message for a missing field without a dedicated one
pub const REQUIRED_MESSAGE: &str = "Required";

pub const PASSWORD_MISMATCH_MESSAGE: &str = "The passwords must match";

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// A present, non-empty string
pub fn required(form: &FormData, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match form.get(field) {
        Some(value) => Some(value.to_string()),
        None => {
            errors.add(field, REQUIRED_MESSAGE);
            None
        }
    }
}

pub fn optional(form: &FormData, field: &str) -> Option<String> {
    form.get(field).map(str::to_string)
}

/// Email address, stored lowercase
pub fn email(form: &FormData, field: &str, errors: &mut FieldErrors) -> Option<String> {
    let Some(value) = form.get(field) else {
        errors.add(field, "Email is required");
        return None;
    };

    let mut valid = true;
    if !value.to_string().validate_email() {
        errors.add(field, "Email is invalid");
        valid = false;
    }
    if char_len(value) < 3 {
        errors.add(field, "Email is too short");
        valid = false;
    }
    if char_len(value) > 100 {
        errors.add(field, "Email is too long");
        valid = false;
    }

    valid.then(|| value.to_lowercase())
}

/// Password of 6 to 100 characters, kept verbatim
pub fn password(form: &FormData, field: &str, errors: &mut FieldErrors) -> Option<String> {
    let Some(value) = form.get(field) else {
        errors.add(field, "Password is required");
        return None;
    };

    let mut valid = true;
    if char_len(value) < 6 {
        errors.add(field, "Password must be at least 6 characters");
        valid = false;
    }
    if char_len(value) > 100 {
        errors.add(field, "Password is too long");
        valid = false;
    }

    valid.then(|| value.to_string())
}

/// Person name, trimmed and normalised to `Capitalised` form
pub fn name(form: &FormData, field: &str, errors: &mut FieldErrors) -> Option<String> {
    let Some(value) = form.get(field) else {
        errors.add(field, "Name is required");
        return None;
    };

    let mut valid = true;
    if char_len(value) < 3 {
        errors.add(field, "Name is too short");
        valid = false;
    }
    if char_len(value) > 40 {
        errors.add(field, "Name is too long");
        valid = false;
    }

    valid.then(|| capitalize_first_letter(&value.trim().to_lowercase()))
}

/// `password` and `confirmPassword`, which must be equal
pub fn password_and_confirm(form: &FormData, errors: &mut FieldErrors) -> Option<String> {
    let password = password(form, "password", errors);
    let confirm = self::password(form, "confirmPassword", errors);

    match (password, confirm) {
        (Some(password), Some(confirm)) if password == confirm => Some(password),
        (Some(_), Some(_)) => {
            errors.add("confirmPassword", PASSWORD_MISMATCH_MESSAGE);
            None
        }
        _ => None,
    }
}

fn capitalize_first_letter(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
