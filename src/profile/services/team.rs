//! Team membership administration for team leaders.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::failure::FailureKind;
use crate::profile::{
    domain::{NewProfile, Profile, ProfileDomainError, ProfileUpdate, Role, UserId, UserSession, UserType},
    ports::{ProfileDirectory, ProfileDirectoryError},
};

/// Fields entered when adding a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMemberRequest {
    email: String,
    full_name: String,
    role: String,
    user_type: UserType,
}

impl AddMemberRequest {
    /// Creates a request for a regular team member.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        full_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            full_name: full_name.into(),
            role: role.into(),
            user_type: UserType::TeamMember,
        }
    }

    /// Sets the permission tier.
    #[must_use]
    pub const fn with_user_type(mut self, user_type: UserType) -> Self {
        self.user_type = user_type;
        self
    }
}

/// A newly added member and the password they first sign in with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedMember {
    /// Stored profile.
    pub profile: Profile,
    /// Generated one-off password to hand to the member.
    pub temporary_password: String,
}

/// Errors returned by team administration operations.
#[derive(Debug, Error)]
pub enum TeamAdminError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProfileDomainError),

    /// The session user is not a team leader.
    #[error("only team leaders may administer the team")]
    Forbidden,

    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] ProfileDirectoryError),
}

impl TeamAdminError {
    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Domain(_) | Self::Forbidden => FailureKind::Validation,
            Self::Directory(err) => err.kind(),
        }
    }
}

/// Result type for team administration operations.
pub type TeamAdminResult<T> = Result<T, TeamAdminError>;

/// Member and role management restricted to team leaders.
#[derive(Clone)]
pub struct TeamAdministrationService<D>
where
    D: ProfileDirectory + ?Sized,
{
    directory: Arc<D>,
}

impl<D> TeamAdministrationService<D>
where
    D: ProfileDirectory + ?Sized,
{
    /// Creates a team administration service.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Lists every team member ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`TeamAdminError::Forbidden`] for non-leaders or the directory
    /// error.
    pub async fn members(&self, session: &UserSession) -> TeamAdminResult<Vec<Profile>> {
        ensure_leader(session)?;
        Ok(self.directory.list().await?)
    }

    /// Adds a member with a freshly generated temporary password.
    ///
    /// # Errors
    ///
    /// Returns [`TeamAdminError::Forbidden`] for non-leaders,
    /// [`TeamAdminError::Domain`] when email, full name or role is blank, or
    /// the directory error.
    pub async fn add_member(
        &self,
        session: &UserSession,
        request: AddMemberRequest,
    ) -> TeamAdminResult<AddedMember> {
        ensure_leader(session)?;
        let new_profile = NewProfile::new(
            request.email,
            request.full_name,
            request.role,
            request.user_type,
        )?;
        let temporary_password = generate_temporary_password();
        let profile = self
            .directory
            .create(&new_profile, &temporary_password)
            .await?;
        info!(user_id = %profile.id(), actor = %session.user_id(), "team member added");
        Ok(AddedMember {
            profile,
            temporary_password,
        })
    }

    /// Updates a member profile.
    ///
    /// # Errors
    ///
    /// Returns [`TeamAdminError::Forbidden`] for non-leaders,
    /// [`ProfileDomainError::EmptyUpdate`] when the update changes nothing,
    /// or the directory error.
    pub async fn update_member(
        &self,
        session: &UserSession,
        id: UserId,
        update: ProfileUpdate,
    ) -> TeamAdminResult<Profile> {
        ensure_leader(session)?;
        if update.is_empty() {
            return Err(ProfileDomainError::EmptyUpdate.into());
        }
        let profile = self.directory.update(id, &update).await?;
        info!(user_id = %id, actor = %session.user_id(), "team member updated");
        Ok(profile)
    }

    /// Lists the role catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`TeamAdminError::Forbidden`] for non-leaders or the directory
    /// error.
    pub async fn roles(&self, session: &UserSession) -> TeamAdminResult<Vec<Role>> {
        ensure_leader(session)?;
        Ok(self.directory.list_roles().await?)
    }
}

fn ensure_leader(session: &UserSession) -> TeamAdminResult<()> {
    if session.is_team_leader() {
        Ok(())
    } else {
        Err(TeamAdminError::Forbidden)
    }
}

fn generate_temporary_password() -> String {
    Uuid::new_v4().simple().to_string()
}
