//! Unit tests for the board module.


use crate::profile::domain::UserId;
use crate::task::domain::{NewTask, Task, TaskStatus};
use mockable::DefaultClock;

fn task_in(title: &str, status: TaskStatus) -> Task {
    let new_task = NewTask::new(title, UserId::new())
        .expect("title is valid")
        .with_status(status);
    Task::create(new_task, &DefaultClock)
}
