//! Unit tests for the profile module.


use crate::profile::domain::{Profile, ProfileRecord, UserId, UserType};
use chrono::Utc;

fn profile(full_name: &str, user_type: UserType) -> Profile {
    Profile::from_record(ProfileRecord {
        id: UserId::new(),
        email: None,
        full_name: full_name.to_owned(),
        role: "Backend".to_owned(),
        user_type,
        avatar_url: None,
        created_at: Utc::now(),
    })
}
