//! REST adapters for GoTrue authentication and the profile tables.

mod auth;
mod directory;
mod models;

pub use auth::RestAuthGateway;
pub use directory::RestProfileDirectory;
