//! Configured HTTP client for the hosted backend.

use super::{BackendError, BackendResult};
use crate::config::BackendConfig;
use reqwest::{Method, RequestBuilder, Url};
use std::time::Duration;

/// Header carrying the project API key on every request.
const API_KEY_HEADER: &str = "apikey";

/// HTTP client bound to one backend project and, optionally, one session.
///
/// Cloning is cheap: the underlying connection pool is shared. Binding a
/// session with [`BackendClient::with_access_token`] returns a new client and
/// leaves the original anonymous client untouched.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    anon_key: String,
    service_role_key: Option<String>,
    access_token: Option<String>,
}

impl BackendClient {
    /// Builds a client from backend configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotConfigured`] when the URL or anonymous key
    /// is blank, [`BackendError::InvalidUrl`] when the URL does not parse, or
    /// [`BackendError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        if config.url.trim().is_empty() {
            return Err(BackendError::NotConfigured("backend.url"));
        }
        if config.anon_key.trim().is_empty() {
            return Err(BackendError::NotConfigured("backend.anon_key"));
        }

        let base_url = normalize_base_url(&config.url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            anon_key: config.anon_key.trim().to_owned(),
            service_role_key: config
                .service_role_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_owned),
            access_token: None,
        })
    }

    /// Returns a client that authenticates requests with the given session
    /// access token.
    #[must_use]
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..self.clone()
        }
    }

    /// Returns the bound session access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns the URL of a PostgREST table endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidUrl`] when the table name cannot be
    /// joined onto the base URL.
    pub fn rest_url(&self, table: &str) -> BackendResult<Url> {
        self.join(&format!("rest/v1/{table}"))
    }

    /// Returns the URL of a GoTrue authentication endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidUrl`] when the path cannot be joined
    /// onto the base URL.
    pub fn auth_url(&self, path: &str) -> BackendResult<Url> {
        self.join(&format!("auth/v1/{path}"))
    }

    /// Starts a request carrying the API key and the session bearer token
    /// (or the anonymous key when no session is bound).
    #[must_use]
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        self.http
            .request(method, url)
            .header(API_KEY_HEADER, &self.anon_key)
            .bearer_auth(bearer)
    }

    /// Starts a request authenticated with the service role key.
    ///
    /// Administrative endpoints such as user creation refuse the anonymous
    /// key.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotConfigured`] when no service role key has
    /// been configured.
    pub fn admin_request(&self, method: Method, url: Url) -> BackendResult<RequestBuilder> {
        let key = self
            .service_role_key
            .as_deref()
            .ok_or(BackendError::NotConfigured("backend.service_role_key"))?;
        Ok(self
            .http
            .request(method, url)
            .header(API_KEY_HEADER, key)
            .bearer_auth(key))
    }

    fn join(&self, path: &str) -> BackendResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| BackendError::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                reason: err.to_string(),
            })
    }
}

/// Parses the configured URL and guarantees a trailing slash so relative
/// joins keep any path prefix.
fn normalize_base_url(raw: &str) -> BackendResult<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(&format!("{trimmed}/")).map_err(|err| BackendError::InvalidUrl {
        url: raw.to_owned(),
        reason: err.to_string(),
    })
}
