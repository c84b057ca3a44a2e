//! Authentication port.

use crate::failure::FailureKind;
use crate::profile::domain::{AuthSession, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Password authentication against the hosted backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the backend refuses the
    /// credentials.
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession>;

    /// Revokes a session.
    async fn sign_out(&self, session: &AuthSession) -> AuthResult<()>;

    /// Resolves the user behind an access token.
    ///
    /// Returns `None` when the token is expired or revoked.
    async fn current_user(&self, access_token: &str) -> AuthResult<Option<UserId>>;
}

/// Errors returned by authentication gateways.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The email and password do not match an account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The authentication service could not be reached.
    #[error("authentication service unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthError {
    /// Wraps a transport failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidCredentials | Self::Unavailable(_) => FailureKind::NetworkOrAuth,
        }
    }
}
