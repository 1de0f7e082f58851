//! Verification email bodies
//!
//! Each email has an `.html` and a `.txt` template. Tera escapes values in
//! the `.html` variants.

use std::sync::OnceLock;

use tera::{Context, Tera};

use super::EmailMessage;
use crate::errors::{DomainError, DomainResult};

pub const FORGOT_PASSWORD_SUBJECT: &str = "Notekeep Password Reset";
pub const ONBOARDING_SUBJECT: &str = "Welcome to Notekeep!";

const VERIFICATION_HTML: &str = r#"<html lang="en" dir="ltr"><body>
<h1>{{ heading }}</h1>
<p>Here's your verification code: <strong>{{ otp }}</strong></p>
<p>Or click the link:</p>
<a href="{{ url }}">{{ url }}</a>
</body></html>
"#;

const VERIFICATION_TEXT: &str = "{{ heading }}

Here's your verification code: {{ otp }}

Or open this link: {{ url }}
";

const TEMPLATES: [(&str, &str); 4] = [
    ("forgot_password.html", VERIFICATION_HTML),
    ("forgot_password.txt", VERIFICATION_TEXT),
    ("onboarding.html", VERIFICATION_HTML),
    ("onboarding.txt", VERIFICATION_TEXT),
];

/// Password reset email carrying the code and the reset link
pub fn forgot_password_email(to: &str, otp: &str, verify_url: &str) -> DomainResult<EmailMessage> {
    render_pair("forgot_password", to, FORGOT_PASSWORD_SUBJECT, otp, verify_url)
}

/// Signup email carrying the code and the onboarding link
pub fn onboarding_email(to: &str, otp: &str, onboarding_url: &str) -> DomainResult<EmailMessage> {
    render_pair("onboarding", to, ONBOARDING_SUBJECT, otp, onboarding_url)
}

fn render_pair(
    name: &str,
    to: &str,
    subject: &str,
    otp: &str,
    url: &str,
) -> DomainResult<EmailMessage> {
    let tera = engine()?;

    let mut context = Context::new();
    context.insert("heading", subject);
    context.insert("otp", otp);
    context.insert("url", url);

    let html = render(tera, &format!("{}.html", name), &context)?;
    let text = render(tera, &format!("{}.txt", name), &context)?;

    Ok(EmailMessage {
        to: to.to_string(),
        subject: subject.to_string(),
        html,
        text,
    })
}

fn render(tera: &Tera, template: &str, context: &Context) -> DomainResult<String> {
    tera.render(template, context)
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to render email template {}: {}", template, e),
        })
}

fn engine() -> DomainResult<&'static Tera> {
    static ENGINE: OnceLock<Result<Tera, String>> = OnceLock::new();

    ENGINE
        .get_or_init(|| {
            let mut tera = Tera::default();
            tera.add_raw_templates(TEMPLATES)
                .map_err(|e| format!("Failed to load email templates: {}", e))?;
            Ok(tera)
        })
        .as_ref()
        .map_err(|message| DomainError::Internal {
            message: message.clone(),
        })
}
