//! Error types for profile domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing profile values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileDomainError {
    /// A required field is blank.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// The email address is not plausibly valid.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The update does not change any field.
    #[error("profile update must change at least one field")]
    EmptyUpdate,
}

/// Error returned while parsing user types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user type: {0}")]
pub struct ParseUserTypeError(pub String);
