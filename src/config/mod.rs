//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TEAMBOARD_*` prefix, `__` as separator)
//! 2. Project-level `./teamboard.toml`
//! 3. User-level `~/.config/teamboard/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `TEAMBOARD_BACKEND__ANON_KEY` to `backend.anon_key`,
//! `TEAMBOARD_NOTIFICATIONS__WEBHOOK_URL` to `notifications.webhook_url`, and
//! so on.

mod auth;
mod backend;
mod error;
mod logging;
mod notifications;

pub use auth::AuthConfig;
pub use backend::BackendConfig;
pub use error::ConfigError;
pub use logging::LogConfig;
pub use notifications::NotificationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix.
const ENV_PREFIX: &str = "TEAMBOARD_";

/// Project-local configuration file name.
const LOCAL_CONFIG_FILE: &str = "teamboard.toml";

/// Complete client configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TeamboardConfig {
    /// Hosted backend connection settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Task change notification settings.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Credentials used by the command-line front-end.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl TeamboardConfig {
    /// Loads configuration from all sources and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or
    /// [`ConfigError::InvalidValue`] when a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(&Self::figment())
    }

    /// Loads configuration from an explicit file instead of the default file
    /// locations. Environment variables still take precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] as for [`TeamboardConfig::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(&figment)
    }

    /// Builds the default figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend.validate()?;
        self.notifications.validate()
    }

    fn extract(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("teamboard").join("config.toml"))
    }
}
