//! Logging settings.

use serde::{Deserialize, Serialize};

fn default_filter() -> String {
    "info".to_owned()
}

/// Settings for the tracing subscriber.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` overrides it.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}
