//! PostgREST-backed profile directory.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

use super::models::{AdminCreateUser, AuthUserRow, NewProfileRow, ProfileUpdateRow};
use crate::backend::{BackendClient, BackendError, check_response};
use crate::profile::{
    domain::{NewProfile, Profile, ProfileUpdate, Role, UserId},
    ports::{ProfileDirectory, ProfileDirectoryError, ProfileDirectoryResult},
};

const PROFILES_TABLE: &str = "profiles";
const ROLES_TABLE: &str = "roles";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Profile directory over the `profiles` and `roles` tables.
///
/// Creating members uses the administrative user endpoint and therefore
/// needs a client configured with the service role key.
#[derive(Debug, Clone)]
pub struct RestProfileDirectory {
    client: BackendClient,
}

impl RestProfileDirectory {
    /// Creates a directory over a session-bound backend client.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    fn table(&self, table: &str, method: Method) -> ProfileDirectoryResult<RequestBuilder> {
        let url = self
            .client
            .rest_url(table)
            .map_err(ProfileDirectoryError::unavailable)?;
        Ok(self.client.request(method, url))
    }

    async fn fetch<T: DeserializeOwned>(
        request: RequestBuilder,
        id: Option<UserId>,
    ) -> ProfileDirectoryResult<T> {
        let sent = request
            .send()
            .await
            .map_err(|err| map_backend_error(BackendError::from(err), id))?;
        let response = check_response(sent)
            .await
            .map_err(|err| map_backend_error(err, id))?;
        response
            .json()
            .await
            .map_err(|err| map_backend_error(BackendError::Decode(err.to_string()), id))
    }

    async fn fetch_one(request: RequestBuilder, id: UserId) -> ProfileDirectoryResult<Profile> {
        let rows: Vec<Profile> = Self::fetch(request, Some(id)).await?;
        rows.into_iter()
            .next()
            .ok_or(ProfileDirectoryError::NotFound(id))
    }
}

#[async_trait]
impl ProfileDirectory for RestProfileDirectory {
    #[instrument(skip(self), err)]
    async fn find(&self, id: UserId) -> ProfileDirectoryResult<Profile> {
        let request = self
            .table(PROFILES_TABLE, Method::GET)?
            .query(&[("select", "*".to_owned()), ("id", format!("eq.{id}"))]);
        Self::fetch_one(request, id).await
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> ProfileDirectoryResult<Vec<Profile>> {
        let request = self
            .table(PROFILES_TABLE, Method::GET)?
            .query(&[("select", "*"), ("order", "full_name.asc")]);
        Self::fetch(request, None).await
    }

    #[instrument(skip(self, profile, temporary_password), fields(email = profile.email()), err)]
    async fn create(
        &self,
        profile: &NewProfile,
        temporary_password: &str,
    ) -> ProfileDirectoryResult<Profile> {
        let url = self
            .client
            .auth_url("admin/users")
            .map_err(ProfileDirectoryError::unavailable)?;
        let request = self
            .client
            .admin_request(Method::POST, url)
            .map_err(ProfileDirectoryError::unavailable)?
            .json(&AdminCreateUser::new(profile, temporary_password));
        let user: AuthUserRow = Self::fetch(request, None).await?;
        info!(user_id = %user.id, "authentication user created");

        let insert = self
            .table(PROFILES_TABLE, Method::POST)?
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&NewProfileRow::new(user.id, profile));
        Self::fetch_one(insert, user.id).await.inspect_err(|err| {
            warn!(
                user_id = %user.id,
                error = %err,
                "profile insert failed; authentication user left without a profile"
            );
        })
    }

    #[instrument(skip(self, update), err)]
    async fn update(&self, id: UserId, update: &ProfileUpdate) -> ProfileDirectoryResult<Profile> {
        if update.is_empty() {
            return self.find(id).await;
        }
        let request = self
            .table(PROFILES_TABLE, Method::PATCH)?
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&ProfileUpdateRow::from(update));
        Self::fetch_one(request, id).await
    }

    #[instrument(skip(self), err)]
    async fn list_roles(&self) -> ProfileDirectoryResult<Vec<Role>> {
        let request = self
            .table(ROLES_TABLE, Method::GET)?
            .query(&[("select", "*"), ("order", "name.asc")]);
        Self::fetch(request, None).await
    }
}

fn map_backend_error(err: BackendError, id: Option<UserId>) -> ProfileDirectoryError {
    match (err, id) {
        (BackendError::NotFound(_), Some(user)) => ProfileDirectoryError::NotFound(user),
        (BackendError::Rejected { message, .. }, _) => ProfileDirectoryError::Rejected(message),
        (other, _) => ProfileDirectoryError::unavailable(other),
    }
}
