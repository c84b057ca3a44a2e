//! Sign-in, session restore and sign-out.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::failure::FailureKind;
use crate::profile::{
    domain::{AuthSession, UserId, UserSession},
    ports::{AuthError, AuthGateway, ProfileDirectory, ProfileDirectoryError},
};

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Authentication failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The authenticated user has no profile.
    #[error("no profile exists for user {0}")]
    MissingProfile(UserId),

    /// Profile lookup failed.
    #[error(transparent)]
    Directory(#[from] ProfileDirectoryError),
}

impl SessionError {
    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Auth(err) => err.kind(),
            Self::MissingProfile(_) => FailureKind::NotFound,
            Self::Directory(err) => err.kind(),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Establishes the [`UserSession`] capability.
#[derive(Clone)]
pub struct SessionService<A, D>
where
    A: AuthGateway + ?Sized,
    D: ProfileDirectory + ?Sized,
{
    auth: Arc<A>,
    directory: Arc<D>,
}

impl<A, D> SessionService<A, D>
where
    A: AuthGateway + ?Sized,
    D: ProfileDirectory + ?Sized,
{
    /// Creates a session service.
    #[must_use]
    pub const fn new(auth: Arc<A>, directory: Arc<D>) -> Self {
        Self { auth, directory }
    }

    /// Checks a previously issued access token once at startup.
    ///
    /// Returns `None` when the token is expired or revoked.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingProfile`] when the token is valid but
    /// the user has no profile, or the underlying auth or directory error.
    pub async fn restore(&self, access_token: &str) -> SessionResult<Option<UserSession>> {
        let Some(user_id) = self.auth.current_user(access_token).await? else {
            info!("stored session is no longer valid");
            return Ok(None);
        };
        let session = self
            .establish(AuthSession::new(access_token, user_id))
            .await?;
        Ok(Some(session))
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for wrong credentials and
    /// [`SessionError::MissingProfile`] when the account has no profile.
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<UserSession> {
        let auth = self.auth.sign_in(email, password).await?;
        let session = self.establish(auth).await?;
        info!(user_id = %session.user_id(), "signed in");
        Ok(session)
    }

    /// Signs out and consumes the session.
    ///
    /// # Errors
    ///
    /// Returns the auth error when the backend could not revoke the session.
    pub async fn logout(&self, session: UserSession) -> SessionResult<()> {
        let (auth, _) = session.into_parts();
        self.auth.sign_out(&auth).await?;
        info!(user_id = %auth.user_id(), "signed out");
        Ok(())
    }

    async fn establish(&self, auth: AuthSession) -> SessionResult<UserSession> {
        let user_id = auth.user_id();
        match self.directory.find(user_id).await {
            Ok(profile) => Ok(UserSession::new(auth, profile)),
            Err(ProfileDirectoryError::NotFound(_)) => {
                warn!(user_id = %user_id, "authenticated user has no profile");
                Err(SessionError::MissingProfile(user_id))
            }
            Err(err) => Err(err.into()),
        }
    }
}
