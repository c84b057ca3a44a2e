//! Port contracts for authentication and the profile directory.

pub mod auth;
pub mod directory;

pub use auth::{AuthError, AuthGateway, AuthResult};
pub use directory::{ProfileDirectory, ProfileDirectoryError, ProfileDirectoryResult};

#[cfg(test)]
pub use auth::MockAuthGateway;
#[cfg(test)]
pub use directory::MockProfileDirectory;
