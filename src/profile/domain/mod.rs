//! Domain model for team members, roles, and sessions.
//!
//! Profiles are owned by the backend. [`UserSession`] is the capability
//! object handed to every operation that depends on who is signed in.

mod error;
mod ids;
mod member;
mod session;

pub use error::{ParseUserTypeError, ProfileDomainError};
pub use ids::{RoleId, UserId};
pub use member::{NewProfile, Profile, ProfileRecord, ProfileSummary, ProfileUpdate, Role, UserType};
pub use session::{AuthSession, UserSession};
