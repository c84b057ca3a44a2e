//! Shared test helpers for in-memory adapter integration tests.

use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use teamboard::{
    profile::{
        adapters::memory::{InMemoryAuthGateway, InMemoryProfileDirectory},
        domain::{AuthSession, Profile, ProfileRecord, UserId, UserSession, UserType},
    },
    task::{
        adapters::memory::InMemoryTaskGateway,
        domain::{NewTask, Task, TaskPriority, TaskStatus},
    },
};

/// A small team sharing one in-memory backend.
pub struct Team {
    pub auth: Arc<InMemoryAuthGateway>,
    pub directory: Arc<InMemoryProfileDirectory>,
    pub tasks: Arc<InMemoryTaskGateway>,
    pub leader: UserSession,
    pub member: UserSession,
}

/// Builds a profile with a deterministic email derived from the name.
#[must_use]
pub fn profile(full_name: &str, role: &str, user_type: UserType) -> Profile {
    let email = format!(
        "{}@example.com",
        full_name.to_lowercase().replace(' ', ".")
    );
    Profile::from_record(ProfileRecord {
        id: UserId::new(),
        email: Some(email),
        full_name: full_name.to_owned(),
        role: role.to_owned(),
        user_type,
        avatar_url: None,
        created_at: Utc::now(),
    })
}

/// Seeds a leader and a member whose sign-in password is `"hunter22"`.
///
/// # Panics
///
/// Panics when the in-memory adapters cannot be seeded.
#[fixture]
pub fn team() -> Team {
    let auth = Arc::new(InMemoryAuthGateway::new());
    let directory = Arc::new(InMemoryProfileDirectory::with_accounts(
        auth.as_ref().clone(),
    ));
    let tasks = Arc::new(InMemoryTaskGateway::new());

    let leader = profile("Selin Aksoy", "Team Lead", UserType::TeamLeader);
    let member = profile("Mert Yilmaz", "Frontend", UserType::TeamMember);
    for person in [&leader, &member] {
        directory.insert(person.clone()).expect("seed profile");
        auth.register(
            person.email().expect("seeded profiles carry an email"),
            "hunter22",
            person.id(),
        )
        .expect("register account");
        tasks
            .register_profile(person.summary())
            .expect("register summary");
    }

    Team {
        auth,
        directory,
        tasks,
        leader: session_for(leader),
        member: session_for(member),
    }
}

/// Wraps `profile` in a session with a placeholder token.
#[must_use]
pub fn session_for(profile: Profile) -> UserSession {
    UserSession::new(AuthSession::new("test-token", profile.id()), profile)
}

/// Seeds one task and returns it as stored.
///
/// # Panics
///
/// Panics when the title is blank or the gateway rejects the insert.
pub fn seed_task(
    gateway: &InMemoryTaskGateway,
    title: &str,
    status: TaskStatus,
    assignee: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
) -> Task {
    let mut new_task = NewTask::new(title, UserId::new())
        .expect("title is valid")
        .with_status(status)
        .with_priority(TaskPriority::Medium);
    if let Some(user) = assignee {
        new_task = new_task.with_assignee(user);
    }
    if let Some(due) = due_date {
        new_task = new_task.with_due_date(due);
    }
    let task = Task::create(new_task, &DefaultClock);
    gateway.insert(task.clone()).expect("seed task");
    task
}
