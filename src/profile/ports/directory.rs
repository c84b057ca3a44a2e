//! Profile directory port.

use crate::failure::FailureKind;
use crate::profile::domain::{NewProfile, Profile, ProfileUpdate, Role, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile directory operations.
pub type ProfileDirectoryResult<T> = Result<T, ProfileDirectoryError>;

/// Access contract for team member profiles and the role catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Fetches one profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDirectoryError::NotFound`] when no profile exists for
    /// the user.
    async fn find(&self, id: UserId) -> ProfileDirectoryResult<Profile>;

    /// Lists every profile ordered by full name.
    async fn list(&self) -> ProfileDirectoryResult<Vec<Profile>>;

    /// Creates the authentication user with `temporary_password` and inserts
    /// its profile.
    async fn create(
        &self,
        profile: &NewProfile,
        temporary_password: &str,
    ) -> ProfileDirectoryResult<Profile>;

    /// Applies a partial update and returns the stored profile.
    async fn update(&self, id: UserId, update: &ProfileUpdate) -> ProfileDirectoryResult<Profile>;

    /// Lists the role catalogue ordered by name.
    async fn list_roles(&self) -> ProfileDirectoryResult<Vec<Role>>;
}

/// Errors returned by profile directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileDirectoryError {
    /// No profile exists for the user.
    #[error("profile not found: {0}")]
    NotFound(UserId),

    /// The backend rejected the payload, for example a duplicate email.
    #[error("profile change rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached or refused the session.
    #[error("profile backend unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileDirectoryError {
    /// Wraps a transport or authentication failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Rejected(_) => FailureKind::Validation,
            Self::Unavailable(_) => FailureKind::NetworkOrAuth,
        }
    }
}
