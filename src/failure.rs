//! Failure classification shared by every error type in the crate.
//!
//! Every operation failure is terminal for the operation that triggered it:
//! nothing is retried automatically and local state is never mutated on the
//! failure path. The classification only decides how the failure is shown.

use std::fmt;

/// Coarse failure category used to decide how an error is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The backend could not be reached or rejected the session.
    NetworkOrAuth,
    /// The addressed record does not exist.
    NotFound,
    /// The request was rejected because its input is invalid or forbidden.
    Validation,
}

/// How a failure is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// A transient notification that disappears on its own.
    Transient,
    /// An inline message next to the input that caused it.
    Inline,
}

impl FailureKind {
    /// Returns the presentation used for this failure category.
    #[must_use]
    pub const fn surface(self) -> Surface {
        match self {
            Self::NetworkOrAuth | Self::NotFound => Surface::Transient,
            Self::Validation => Surface::Inline,
        }
    }

    /// Returns a stable lowercase label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetworkOrAuth => "network_or_auth",
            Self::NotFound => "not_found",
            Self::Validation => "validation",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
