//! Given steps for kanban drag-and-drop BDD scenarios.

use super::world::{KanbanWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use teamboard::{
    profile::domain::UserId,
    task::domain::{NewTask, Task, TaskStatus},
};

#[given("a board with one task in each column")]
fn board_with_one_task_per_column(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    for status in TaskStatus::ALL {
        let new_task = NewTask::new(format!("Card in {status}"), UserId::new())
            .wrap_err("build seed task")?
            .with_status(status);
        let task = Task::create(new_task, &DefaultClock);
        world.seeded.insert(status, task.id());
        world.gateway.insert(task).wrap_err("seed task")?;
    }
    run_async(world.board.load()).wrap_err("load board")?;
    Ok(())
}

#[given("the backend is unreachable")]
fn backend_unreachable(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    world
        .gateway
        .set_unavailable(true)
        .wrap_err("take backend offline")
}
