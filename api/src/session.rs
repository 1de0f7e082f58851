//! Signed cookie session
//!
//! Three cookies carry per-request state:
//! - the session cookie names the signed-in user ([`SessionContext`])
//! - the verify cookie carries what a verification unlocked ([`VerifySession`])
//! - the toast cookie carries a one-shot message for the next page
//!
//! Each value is JSON, signed with a key derived from
//! [`SessionConfig::secret`]. A cookie that is missing, tampered with or
//! unparsable reads as the empty default.

use actix_web::cookie::{time::Duration, Cookie, CookieJar, Key, SameSite};
use actix_web::HttpRequest;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use nk_core::domain::value_objects::{SessionContext, Toast, VerifySession};
use nk_shared::SessionConfig;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session secret must be at least 32 bytes")]
    SecretTooShort,
}

/// Signing key plus cookie settings
#[derive(Clone)]
pub struct SessionKeys {
    key: Key,
    config: SessionConfig,
}

impl SessionKeys {
    pub fn new(config: &SessionConfig) -> Result<Self, SessionError> {
        if !config.has_valid_secret() {
            return Err(SessionError::SecretTooShort);
        }
        Ok(Self {
            key: Key::derive_from(config.secret.as_bytes()),
            config: config.clone(),
        })
    }

    pub fn verify_session(&self, req: &HttpRequest) -> VerifySession {
        self.read(req, &self.config.verify_cookie_name)
            .unwrap_or_default()
    }

    pub fn session_context(&self, req: &HttpRequest) -> SessionContext {
        self.read(req, &self.config.cookie_name).unwrap_or_default()
    }

    /// Replacement verify cookie, short-lived
    pub fn verify_cookie(&self, session: &VerifySession) -> Option<Cookie<'static>> {
        let max_age = Duration::seconds(self.config.verify_max_age_seconds);
        self.write(&self.config.verify_cookie_name, session, Some(max_age))
    }

    /// Toast shown by the page the client lands on
    pub fn toast_cookie(&self, toast: &Toast) -> Option<Cookie<'static>> {
        self.write(&self.config.toast_cookie_name, toast, None)
    }

    /// Session cookie for a signed-in user
    pub fn session_cookie(&self, ctx: &SessionContext) -> Option<Cookie<'static>> {
        self.write(&self.config.cookie_name, ctx, None)
    }

    fn read<T: DeserializeOwned>(&self, req: &HttpRequest, name: &str) -> Option<T> {
        let cookie = req.cookie(name)?;
        let mut jar = CookieJar::new();
        jar.add_original(cookie);
        let verified = jar.signed(&self.key).get(name)?;
        match serde_json::from_str(verified.value()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(cookie = name, error = %e, "Discarding unreadable session cookie");
                None
            }
        }
    }

    fn write<T: Serialize>(
        &self,
        name: &str,
        value: &T,
        max_age: Option<Duration>,
    ) -> Option<Cookie<'static>> {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(cookie = name, error = %e, "Failed to serialize session cookie");
                return None;
            }
        };

        let mut cookie = Cookie::build(name.to_string(), json)
            .path("/")
            .http_only(true)
            .secure(self.config.secure)
            .same_site(SameSite::Lax)
            .finish();
        if let Some(max_age) = max_age {
            cookie.set_max_age(max_age);
        }

        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key).add(cookie);
        jar.get(name).cloned()
    }
}
