//! Error classification for backend responses.

use crate::failure::FailureKind;
use thiserror::Error;

/// Result type for backend plumbing operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors produced while talking to the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// A required setting is missing.
    #[error("backend setting '{0}' is not configured")]
    NotConfigured(&'static str),

    /// The configured or derived URL is invalid.
    #[error("invalid backend url '{url}': {reason}")]
    InvalidUrl {
        /// Offending URL.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// HTTP transport failure (connection, timeout, body decoding).
    #[error("backend transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend rejected the credentials or the session.
    #[error("session rejected ({status}): {message}")]
    Unauthorized {
        /// HTTP status code.
        status: u16,
        /// Backend diagnostic.
        message: String,
    },

    /// The addressed record does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The backend rejected the request payload.
    #[error("request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Backend diagnostic.
        message: String,
    },

    /// Any other non-success response.
    #[error("backend error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Backend diagnostic.
        message: String,
    },

    /// A success response did not have the expected shape.
    #[error("unexpected backend response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Classifies a non-success HTTP status.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            401 | 403 => Self::Unauthorized { status, message },
            404 | 406 => Self::NotFound(message),
            400 | 409 | 422 => Self::Rejected { status, message },
            _ => Self::Api { status, message },
        }
    }

    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Rejected { .. } => FailureKind::Validation,
            Self::NotConfigured(_)
            | Self::InvalidUrl { .. }
            | Self::Transport(_)
            | Self::Unauthorized { .. }
            | Self::Api { .. }
            | Self::Decode(_) => FailureKind::NetworkOrAuth,
        }
    }
}

/// Returns the response unchanged on success, or the classified error.
///
/// # Errors
///
/// Returns the [`BackendError`] matching the response status when it is not
/// a success status.
pub async fn check_response(resp: reqwest::Response) -> BackendResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(BackendError::from_status(status.as_u16(), &body))
}

/// Pulls the human-readable message out of a backend error body.
///
/// PostgREST reports `message`, GoTrue reports `msg` or
/// `error_description`; anything else is returned verbatim.
fn extract_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    parsed
        .as_ref()
        .and_then(|value| {
            ["message", "msg", "error_description"]
                .iter()
                .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        })
        .map_or_else(|| body.trim().to_owned(), str::to_owned)
}
