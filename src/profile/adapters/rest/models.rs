//! Wire representations for authentication and profile endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::domain::{AuthSession, NewProfile, ProfileUpdate, UserId, UserType};

/// Password grant response.
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUserRow,
}

impl From<TokenResponse> for AuthSession {
    fn from(response: TokenResponse) -> Self {
        let mut session = Self::new(response.access_token, response.user.id);
        if let Some(refresh_token) = response.refresh_token {
            session = session.with_refresh_token(refresh_token);
        }
        if let Some(expires_at) = response
            .expires_at
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        {
            session = session.with_expires_at(expires_at);
        }
        session
    }
}

/// Authentication user as returned by `user` and `admin/users`.
#[derive(Debug, Deserialize)]
pub(super) struct AuthUserRow {
    pub(super) id: UserId,
}

/// Password grant request body.
#[derive(Debug, Serialize)]
pub(super) struct PasswordGrant<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

/// Administrative user creation body.
#[derive(Debug, Serialize)]
pub(super) struct AdminCreateUser<'a> {
    email: &'a str,
    password: &'a str,
    email_confirm: bool,
    user_metadata: UserMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct UserMetadata<'a> {
    full_name: &'a str,
}

impl<'a> AdminCreateUser<'a> {
    pub(super) fn new(profile: &'a NewProfile, password: &'a str) -> Self {
        Self {
            email: profile.email(),
            password,
            email_confirm: true,
            user_metadata: UserMetadata {
                full_name: profile.full_name(),
            },
        }
    }
}

/// Profile insert body.
#[derive(Debug, Serialize)]
pub(super) struct NewProfileRow<'a> {
    id: UserId,
    email: &'a str,
    full_name: &'a str,
    role: &'a str,
    user_type: UserType,
    avatar_url: Option<&'a str>,
}

impl<'a> NewProfileRow<'a> {
    pub(super) fn new(id: UserId, profile: &'a NewProfile) -> Self {
        Self {
            id,
            email: profile.email(),
            full_name: profile.full_name(),
            role: profile.role(),
            user_type: profile.user_type(),
            avatar_url: profile.avatar_url(),
        }
    }
}

/// Profile partial update body.
#[derive(Debug, Serialize)]
pub(super) struct ProfileUpdateRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_type: Option<UserType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<Option<&'a str>>,
}

impl<'a> From<&'a ProfileUpdate> for ProfileUpdateRow<'a> {
    fn from(update: &'a ProfileUpdate) -> Self {
        Self {
            full_name: update.full_name(),
            role: update.role(),
            user_type: update.user_type(),
            avatar_url: update.avatar_url(),
        }
    }
}
