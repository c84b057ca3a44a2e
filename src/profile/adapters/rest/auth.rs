//! GoTrue-backed authentication gateway.

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, instrument};

use super::models::{AuthUserRow, PasswordGrant, TokenResponse};
use crate::backend::{BackendClient, BackendError, check_response};
use crate::profile::{
    domain::{AuthSession, UserId},
    ports::{AuthError, AuthGateway, AuthResult},
};

/// Authentication gateway for the backend's GoTrue endpoints.
#[derive(Debug, Clone)]
pub struct RestAuthGateway {
    client: BackendClient,
}

impl RestAuthGateway {
    /// Creates a gateway over an anonymous backend client.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for RestAuthGateway {
    #[instrument(skip(self, password), err)]
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let url = self
            .client
            .auth_url("token")
            .map_err(AuthError::unavailable)?;
        let sent = self
            .client
            .request(Method::POST, url)
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password })
            .send()
            .await
            .map_err(AuthError::unavailable)?;
        let response = check_response(sent).await.map_err(|err| match err {
            BackendError::Rejected { .. } => AuthError::InvalidCredentials,
            other => AuthError::unavailable(other),
        })?;
        let token: TokenResponse = response.json().await.map_err(AuthError::unavailable)?;
        Ok(token.into())
    }

    #[instrument(skip(self, session), fields(user_id = %session.user_id()), err)]
    async fn sign_out(&self, session: &AuthSession) -> AuthResult<()> {
        let url = self
            .client
            .auth_url("logout")
            .map_err(AuthError::unavailable)?;
        let response = self
            .client
            .with_access_token(session.access_token())
            .request(Method::POST, url)
            .send()
            .await
            .map_err(AuthError::unavailable)?;
        match check_response(response).await {
            Ok(_) => Ok(()),
            Err(BackendError::Unauthorized { .. }) => {
                debug!("session already invalid at sign-out");
                Ok(())
            }
            Err(err) => Err(AuthError::unavailable(err)),
        }
    }

    #[instrument(skip(self, access_token), err)]
    async fn current_user(&self, access_token: &str) -> AuthResult<Option<UserId>> {
        let url = self
            .client
            .auth_url("user")
            .map_err(AuthError::unavailable)?;
        let response = self
            .client
            .with_access_token(access_token)
            .request(Method::GET, url)
            .send()
            .await
            .map_err(AuthError::unavailable)?;
        match check_response(response).await {
            Ok(ok) => {
                let user: AuthUserRow = ok.json().await.map_err(AuthError::unavailable)?;
                Ok(Some(user.id))
            }
            Err(BackendError::Unauthorized { .. } | BackendError::NotFound(_)) => Ok(None),
            Err(err) => Err(AuthError::unavailable(err)),
        }
    }
}
