//! Session and team administration services.

mod session;
mod team;

pub use session::{SessionError, SessionResult, SessionService};
pub use team::{AddMemberRequest, AddedMember, TeamAdminError, TeamAdminResult, TeamAdministrationService};
