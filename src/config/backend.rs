//! Hosted backend connection settings.

use super::ConfigError;
use serde::{Deserialize, Serialize};

const fn default_request_timeout_secs() -> u64 {
    30
}

/// Connection settings for the hosted backend project.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: String,

    /// Public anonymous API key.
    #[serde(default)]
    pub anon_key: String,

    /// Service role key required for administrative user creation.
    #[serde(default)]
    pub service_role_key: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            service_role_key: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Returns `true` when the URL and anonymous key are both set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }

    /// Requires the section to be configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the URL or anonymous key
    /// is missing.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if self.is_configured() {
            Ok(self)
        } else {
            Err(ConfigError::NotConfigured {
                section: "backend".to_owned(),
            })
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.request_timeout_secs".to_owned(),
                reason: "must be greater than zero".to_owned(),
            });
        }
        Ok(())
    }
}
