//! In-memory profile directory.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::sync::{Arc, RwLock};

use super::InMemoryAuthGateway;
use crate::profile::{
    domain::{NewProfile, Profile, ProfileRecord, ProfileUpdate, Role, UserId},
    ports::{ProfileDirectory, ProfileDirectoryError, ProfileDirectoryResult},
};

/// Thread-safe in-memory profile directory.
///
/// Creating a profile also registers its account with the linked
/// [`InMemoryAuthGateway`], so new members can sign in with their temporary
/// password.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
    accounts: InMemoryAuthGateway,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    profiles: Vec<Profile>,
    roles: Vec<Role>,
}

fn lock_error(err: impl std::fmt::Display) -> ProfileDirectoryError {
    ProfileDirectoryError::unavailable(std::io::Error::other(err.to_string()))
}

impl InMemoryProfileDirectory {
    /// Creates an empty directory with its own account store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty directory that registers accounts in `accounts`.
    #[must_use]
    pub fn with_accounts(accounts: InMemoryAuthGateway) -> Self {
        Self {
            state: Arc::default(),
            accounts,
        }
    }

    /// Returns the linked account store.
    #[must_use]
    pub const fn accounts(&self) -> &InMemoryAuthGateway {
        &self.accounts
    }

    /// Inserts or replaces a profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDirectoryError::Unavailable`] when the lock is
    /// poisoned.
    pub fn insert(&self, profile: Profile) -> ProfileDirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.profiles.retain(|held| held.id() != profile.id());
        state.profiles.push(profile);
        Ok(())
    }

    /// Adds a role to the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDirectoryError::Unavailable`] when the lock is
    /// poisoned.
    pub fn insert_role(&self, role: Role) -> ProfileDirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.roles.push(role);
        Ok(())
    }
}

#[async_trait]
impl ProfileDirectory for InMemoryProfileDirectory {
    async fn find(&self, id: UserId) -> ProfileDirectoryResult<Profile> {
        let state = self.state.read().map_err(lock_error)?;
        state
            .profiles
            .iter()
            .find(|profile| profile.id() == id)
            .cloned()
            .ok_or(ProfileDirectoryError::NotFound(id))
    }

    async fn list(&self) -> ProfileDirectoryResult<Vec<Profile>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut profiles = state.profiles.clone();
        profiles.sort_by(|left, right| left.full_name().cmp(right.full_name()));
        Ok(profiles)
    }

    async fn create(
        &self,
        profile: &NewProfile,
        temporary_password: &str,
    ) -> ProfileDirectoryResult<Profile> {
        let already_registered = self
            .accounts
            .has_account(profile.email())
            .map_err(ProfileDirectoryError::unavailable)?;
        if already_registered {
            return Err(ProfileDirectoryError::Rejected(format!(
                "a user with email {} is already registered",
                profile.email()
            )));
        }
        let id = UserId::new();
        self.accounts
            .register(profile.email(), temporary_password, id)
            .map_err(ProfileDirectoryError::unavailable)?;
        let created = Profile::from_record(ProfileRecord {
            id,
            email: Some(profile.email().to_owned()),
            full_name: profile.full_name().to_owned(),
            role: profile.role().to_owned(),
            user_type: profile.user_type(),
            avatar_url: profile.avatar_url().map(str::to_owned),
            created_at: DefaultClock.utc(),
        });
        self.insert(created.clone())?;
        Ok(created)
    }

    async fn update(&self, id: UserId, update: &ProfileUpdate) -> ProfileDirectoryResult<Profile> {
        let mut state = self.state.write().map_err(lock_error)?;
        let profile = state
            .profiles
            .iter_mut()
            .find(|profile| profile.id() == id)
            .ok_or(ProfileDirectoryError::NotFound(id))?;
        profile.apply(update);
        Ok(profile.clone())
    }

    async fn list_roles(&self) -> ProfileDirectoryResult<Vec<Role>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut roles = state.roles.clone();
        roles.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(roles)
    }
}
