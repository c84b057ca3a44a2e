//! In-memory account store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::profile::{
    domain::{AuthSession, UserId},
    ports::{AuthError, AuthGateway, AuthResult},
};

/// Thread-safe in-memory authentication gateway.
///
/// Accounts are keyed by lowercase email. Every successful sign-in issues a
/// fresh random access token that stays valid until signed out or revoked.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthGateway {
    state: Arc<RwLock<InMemoryAuthState>>,
}

#[derive(Debug, Default)]
struct InMemoryAuthState {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, UserId>,
}

#[derive(Debug, Clone)]
struct Account {
    user_id: UserId,
    password: String,
}

fn lock_error(err: impl std::fmt::Display) -> AuthError {
    AuthError::unavailable(std::io::Error::other(err.to_string()))
}

impl InMemoryAuthGateway {
    /// Creates an empty account store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces an account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unavailable`] when the lock is poisoned.
    pub fn register(&self, email: &str, password: &str, user_id: UserId) -> AuthResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.accounts.insert(
            email.trim().to_lowercase(),
            Account {
                user_id,
                password: password.to_owned(),
            },
        );
        Ok(())
    }

    /// Returns `true` when an account exists for `email`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unavailable`] when the lock is poisoned.
    pub fn has_account(&self, email: &str) -> AuthResult<bool> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.accounts.contains_key(&email.trim().to_lowercase()))
    }

    /// Invalidates an access token as if it had expired.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unavailable`] when the lock is poisoned.
    pub fn revoke(&self, access_token: &str) -> AuthResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.tokens.remove(access_token);
        Ok(())
    }
}

#[async_trait]
impl AuthGateway for InMemoryAuthGateway {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let mut state = self.state.write().map_err(lock_error)?;
        let user_id = state
            .accounts
            .get(&email.trim().to_lowercase())
            .filter(|account| account.password == password)
            .map(|account| account.user_id)
            .ok_or(AuthError::InvalidCredentials)?;
        let access_token = Uuid::new_v4().simple().to_string();
        state.tokens.insert(access_token.clone(), user_id);
        Ok(AuthSession::new(access_token, user_id))
    }

    async fn sign_out(&self, session: &AuthSession) -> AuthResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.tokens.remove(session.access_token());
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> AuthResult<Option<UserId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tokens.get(access_token).copied())
    }
}
