//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`; an unparsable
/// `default_filter` falls back to `info`. Returns `false` when a global
/// subscriber was already installed, which leaves the existing one active.
#[must_use = "false means an existing subscriber stays active"]
pub fn init(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
