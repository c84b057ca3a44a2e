//! Task change notification settings.

use super::ConfigError;
use serde::{Deserialize, Serialize};

fn default_app_base_url() -> String {
    "http://localhost:5173".to_owned()
}

/// Settings for the chat webhook that receives task change messages.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Webhook endpoint; notifications are disabled when unset.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Base URL of the web client, used to build task links.
    #[serde(default = "default_app_base_url")]
    pub app_base_url: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            app_base_url: default_app_base_url(),
        }
    }
}

impl NotificationConfig {
    /// Returns the webhook URL when one is configured and non-blank.
    #[must_use]
    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.app_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "notifications.app_base_url".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}
