//! Credentials for non-interactive sign-in.

use serde::{Deserialize, Serialize};

/// Account credentials used by the command-line front-end.
///
/// A stored access token is preferred over email and password when both are
/// present.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Account email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Account password.
    #[serde(default)]
    pub password: Option<String>,

    /// Access token of an existing session.
    #[serde(default)]
    pub access_token: Option<String>,
}

impl AuthConfig {
    /// Returns the email and password when both are present.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.trim().is_empty() => Some((email, password)),
            _ => None,
        }
    }

    /// Returns the stored access token when it is non-blank.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
