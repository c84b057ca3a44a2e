//! When steps for kanban drag-and-drop BDD scenarios.

use super::world::{COLUMN_WIDTH, KanbanWorld, run_async};
use rstest_bdd_macros::when;
use teamboard::{board::domain::Rect, task::domain::TaskStatus};

fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

#[when(r#"the "{origin}" task is dragged onto the "{target}" column"#)]
fn drag_task_onto_column(
    world: &mut KanbanWorld,
    origin: String,
    target: String,
) -> Result<(), eyre::Report> {
    let origin_status = parse_status(&origin)?;
    let target_status = parse_status(&target)?;
    let task_id = *world
        .seeded
        .get(&origin_status)
        .ok_or_else(|| eyre::eyre!("no seeded task in {origin}"))?;
    let columns = KanbanWorld::columns();
    let column = columns
        .iter()
        .find(|candidate| candidate.status == target_status)
        .ok_or_else(|| eyre::eyre!("no column for {target}"))?;

    world
        .drag
        .start(task_id, world.board.grouping())
        .map_err(|err| eyre::eyre!("drag did not start: {err}"))?;
    let card = Rect::new(column.rect.left, 40.0, COLUMN_WIDTH, 96.0);
    let hovered = world.drag.hover(&card, &columns);
    if hovered != Some(target_status) {
        return Err(eyre::eyre!("expected to hover {target}, got {hovered:?}"));
    }

    world.dragged = Some(task_id);
    let outcome = world.drag.drop();
    world.last_result = Some(run_async(world.board.handle_drop(outcome)));
    Ok(())
}
