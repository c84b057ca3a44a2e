//! In-memory profile adapters.

mod auth;
mod directory;

pub use auth::InMemoryAuthGateway;
pub use directory::InMemoryProfileDirectory;
