//! Authentication session and the signed-in user capability.

use super::{Profile, UserId};
use chrono::{DateTime, Utc};

/// Tokens issued by the authentication service.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    access_token: String,
    refresh_token: Option<String>,
    user_id: UserId,
    expires_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    /// Creates a session for `user_id`.
    #[must_use]
    pub fn new(access_token: impl Into<String>, user_id: UserId) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            user_id,
            expires_at: None,
        }
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Sets the expiry instant.
    #[must_use]
    pub const fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Returns the bearer access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the refresh token, if issued.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns the authenticated user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the expiry instant, if known.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns `true` when the session has a known expiry at or before `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Signed-in user capability.
///
/// Created by the startup session check or by login and consumed by logout.
/// Operations that depend on the current user take it explicitly instead of
/// reading ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    auth: AuthSession,
    profile: Profile,
}

impl UserSession {
    /// Pairs an authentication session with the user's profile.
    #[must_use]
    pub const fn new(auth: AuthSession, profile: Profile) -> Self {
        Self { auth, profile }
    }

    /// Returns the authentication tokens.
    #[must_use]
    pub const fn auth(&self) -> &AuthSession {
        &self.auth
    }

    /// Returns the signed-in user's profile.
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Returns the signed-in user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.profile.id()
    }

    /// Returns `true` when the signed-in user is a team leader.
    #[must_use]
    pub fn is_team_leader(&self) -> bool {
        self.profile.is_team_leader()
    }

    /// Splits the capability back into its parts.
    #[must_use]
    pub fn into_parts(self) -> (AuthSession, Profile) {
        (self.auth, self.profile)
    }
}
