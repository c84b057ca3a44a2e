//! Team member profiles and the role catalogue.

use super::{ParseUserTypeError, ProfileDomainError, RoleId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission tier of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// Regular member: works on tasks.
    TeamMember,
    /// Leader: creates and deletes tasks and administers membership.
    TeamLeader,
}

impl UserType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TeamMember => "team_member",
            Self::TeamLeader => "team_leader",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UserType {
    type Error = ParseUserTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "team_member" | "member" => Ok(Self::TeamMember),
            "team_leader" | "leader" => Ok(Self::TeamLeader),
            _ => Err(ParseUserTypeError(value.to_owned())),
        }
    }
}

/// Compact profile embedded in task records.
///
/// The backend only selects the columns a view needs, so everything but the
/// identifier and name is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// Profile identifier.
    pub id: UserId,
    /// Display name.
    pub full_name: String,
    /// Free-text role such as `Frontend` or `QA`.
    pub role: Option<String>,
    /// Permission tier.
    pub user_type: Option<UserType>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
}

impl ProfileSummary {
    /// Creates a summary with only the identifier and name.
    #[must_use]
    pub fn new(id: UserId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            role: None,
            user_type: None,
            avatar_url: None,
        }
    }
}

/// Team member profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: UserId,
    email: Option<String>,
    full_name: String,
    role: String,
    user_type: UserType,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a profile from a backend record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Profile identifier, shared with the authentication user.
    pub id: UserId,
    /// Email address, when the backend exposes it.
    pub email: Option<String>,
    /// Display name.
    pub full_name: String,
    /// Free-text role.
    pub role: String,
    /// Permission tier.
    pub user_type: UserType,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Reconstructs a profile from a backend record.
    #[must_use]
    pub fn from_record(record: ProfileRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            full_name: record.full_name,
            role: record.role,
            user_type: record.user_type,
            avatar_url: record.avatar_url,
            created_at: record.created_at,
        }
    }

    /// Returns the profile identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the free-text role.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns the permission tier.
    #[must_use]
    pub const fn user_type(&self) -> UserType {
        self.user_type
    }

    /// Returns the avatar URL, if any.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` for team leaders.
    #[must_use]
    pub fn is_team_leader(&self) -> bool {
        self.user_type == UserType::TeamLeader
    }

    /// Builds the summary embedded in task records.
    #[must_use]
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            id: self.id,
            full_name: self.full_name.clone(),
            role: Some(self.role.clone()),
            user_type: Some(self.user_type),
            avatar_url: self.avatar_url.clone(),
        }
    }

    /// Applies a validated update.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(full_name) = update.full_name() {
            full_name.clone_into(&mut self.full_name);
        }
        if let Some(role) = update.role() {
            role.clone_into(&mut self.role);
        }
        if let Some(user_type) = update.user_type() {
            self.user_type = user_type;
        }
        if let Some(avatar_url) = update.avatar_url() {
            self.avatar_url = avatar_url.map(str::to_owned);
        }
    }
}

/// Validated payload for adding a team member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    email: String,
    full_name: String,
    role: String,
    user_type: UserType,
    avatar_url: Option<String>,
}

impl NewProfile {
    /// Creates a validated new-member payload.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::EmptyField`] when a field is blank or
    /// [`ProfileDomainError::InvalidEmail`] when the email has no `@` between
    /// non-empty parts.
    pub fn new(
        email: impl Into<String>,
        full_name: impl Into<String>,
        role: impl Into<String>,
        user_type: UserType,
    ) -> Result<Self, ProfileDomainError> {
        let email_value = required("email", email.into())?;
        let is_plausible = email_value
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !is_plausible {
            return Err(ProfileDomainError::InvalidEmail(email_value));
        }

        Ok(Self {
            email: email_value,
            full_name: required("full name", full_name.into())?,
            role: required("role", role.into())?,
            user_type,
            avatar_url: None,
        })
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the free-text role.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns the permission tier.
    #[must_use]
    pub const fn user_type(&self) -> UserType {
        self.user_type
    }

    /// Returns the avatar URL.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

/// Partial update of a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    full_name: Option<String>,
    role: Option<String>,
    user_type: Option<UserType>,
    avatar_url: Option<Option<String>>,
}

impl ProfileUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the display name.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::EmptyField`] when the name is blank.
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Result<Self, ProfileDomainError> {
        self.full_name = Some(required("full name", full_name.into())?);
        Ok(self)
    }

    /// Changes the role.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::EmptyField`] when the role is blank.
    pub fn with_role(mut self, role: impl Into<String>) -> Result<Self, ProfileDomainError> {
        self.role = Some(required("role", role.into())?);
        Ok(self)
    }

    /// Changes the permission tier.
    #[must_use]
    pub const fn with_user_type(mut self, user_type: UserType) -> Self {
        self.user_type = Some(user_type);
        self
    }

    /// Sets or clears the avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: Option<String>) -> Self {
        self.avatar_url = Some(avatar_url);
        self
    }

    /// Returns the new display name, if changed.
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Returns the new role, if changed.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Returns the new permission tier, if changed.
    #[must_use]
    pub const fn user_type(&self) -> Option<UserType> {
        self.user_type
    }

    /// Returns the new avatar URL, if changed.
    #[must_use]
    pub fn avatar_url(&self) -> Option<Option<&str>> {
        self.avatar_url.as_ref().map(Option::as_deref)
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.role.is_none()
            && self.user_type.is_none()
            && self.avatar_url.is_none()
    }
}

/// Entry of the role catalogue offered when adding members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier.
    pub id: RoleId,
    /// Role name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

fn required(field: &'static str, value: String) -> Result<String, ProfileDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProfileDomainError::EmptyField(field));
    }
    Ok(trimmed.to_owned())
}
