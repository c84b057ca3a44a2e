//! Board flows driven end to end over the in-memory task gateway.

use std::sync::Arc;

use rstest::rstest;
use teamboard::{
    board::{
        domain::{DragController, DropOutcome, DropTarget, Rect},
        services::{BoardError, KanbanBoard, StatusChangeOutcome},
    },
    task::{
        adapters::{memory::RecordingNotifier, notifying::NotifyingTaskGateway},
        domain::TaskStatus,
        ports::{TaskEvent, TaskGateway, TaskGatewayError},
    },
};

use super::helpers::{Team, seed_task, team};

fn columns() -> Vec<DropTarget> {
    TaskStatus::ALL
        .into_iter()
        .zip([0.0, 300.0, 600.0])
        .map(|(status, left)| DropTarget::new(status, Rect::new(left, 0.0, 280.0, 640.0)))
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dragging_a_card_over_a_column_moves_it_after_confirmation(team: Team) {
    let card = seed_task(&team.tasks, "Write release notes", TaskStatus::Todo, None, None);
    seed_task(&team.tasks, "Review API", TaskStatus::InProgress, None, None);
    let mut board = KanbanBoard::new(Arc::clone(&team.tasks));
    board.load().await.expect("board should load");

    let mut drag = DragController::new();
    drag.start(card.id(), board.grouping())
        .expect("drag should start");
    let hovered = drag.hover(&Rect::new(320.0, 24.0, 260.0, 90.0), &columns());
    assert_eq!(hovered, Some(TaskStatus::InProgress));

    let outcome = board
        .handle_drop(drag.drop())
        .await
        .expect("move should be confirmed");

    let StatusChangeOutcome::Moved(moved) = outcome else {
        panic!("expected a confirmed move");
    };
    assert_eq!(moved.status(), TaskStatus::InProgress);
    let column = board.grouping().column(TaskStatus::InProgress);
    assert_eq!(column.len(), 2);
    assert_eq!(column.last().map(|task| task.id()), Some(card.id()));
    assert!(board.grouping().column(TaskStatus::Todo).is_empty());
    assert_eq!(team.tasks.update_calls().expect("call count"), 1);

    let stored = team.tasks.find_task(card.id()).await.expect("task exists");
    assert_eq!(stored.status(), TaskStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dropping_back_on_the_origin_column_skips_the_backend(team: Team) {
    let card = seed_task(&team.tasks, "Fix login bug", TaskStatus::Done, None, None);
    let mut board = KanbanBoard::new(Arc::clone(&team.tasks));
    board.load().await.expect("board should load");

    let mut drag = DragController::new();
    drag.start(card.id(), board.grouping())
        .expect("drag should start");
    drag.hover(&Rect::new(610.0, 10.0, 260.0, 90.0), &columns());
    let outcome = drag.drop();

    assert_eq!(outcome, DropOutcome::Unchanged(card.id()));
    let result = board.handle_drop(outcome).await.expect("no-op drop");
    assert!(matches!(result, StatusChangeOutcome::Unchanged));
    assert_eq!(team.tasks.update_calls().expect("call count"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_drag_leaves_board_untouched(team: Team) {
    let card = seed_task(&team.tasks, "Plan sprint", TaskStatus::Todo, None, None);
    let mut board = KanbanBoard::new(Arc::clone(&team.tasks));
    board.load().await.expect("board should load");
    let before = board.grouping().clone();

    let mut drag = DragController::new();
    drag.start(card.id(), board.grouping())
        .expect("drag should start");
    drag.hover_target(Some(TaskStatus::Done));
    let result = board
        .handle_drop(drag.cancel())
        .await
        .expect("cancel is not an error");

    assert!(matches!(result, StatusChangeOutcome::Unchanged));
    assert_eq!(board.grouping(), &before);
    assert_eq!(team.tasks.update_calls().expect("call count"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_backend_keeps_card_in_its_column(team: Team) {
    let card = seed_task(&team.tasks, "Migrate database", TaskStatus::Todo, None, None);
    let mut board = KanbanBoard::new(Arc::clone(&team.tasks));
    board.load().await.expect("board should load");
    team.tasks.set_unavailable(true).expect("toggle backend");

    let err = board
        .apply_status_change(card.id(), TaskStatus::Done)
        .await
        .expect_err("backend is down");

    assert!(matches!(
        err,
        BoardError::Gateway(TaskGatewayError::Unavailable(_))
    ));
    assert_eq!(board.grouping().status_of(card.id()), Some(TaskStatus::Todo));
    assert!(board.grouping().column(TaskStatus::Done).is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_reload_keeps_the_previous_board(team: Team) {
    seed_task(&team.tasks, "Design onboarding", TaskStatus::InProgress, None, None);
    let mut board = KanbanBoard::new(Arc::clone(&team.tasks));
    board.load().await.expect("board should load");
    team.tasks.set_unavailable(true).expect("toggle backend");

    assert!(board.load().await.is_err());
    assert_eq!(board.grouping().len(), 1);
    assert_eq!(board.grouping().column(TaskStatus::InProgress).len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moved_card_keeps_assignee_summary(team: Team) {
    let card = seed_task(
        &team.tasks,
        "Polish dashboard",
        TaskStatus::InProgress,
        Some(team.member.user_id()),
        None,
    );
    let mut board = KanbanBoard::new(Arc::clone(&team.tasks));
    board.load().await.expect("board should load");

    board
        .apply_status_change(card.id(), TaskStatus::Done)
        .await
        .expect("move should be confirmed");

    let stored = board
        .grouping()
        .find(card.id())
        .expect("task stays on the board");
    assert_eq!(
        stored.assignee().map(|summary| summary.full_name.as_str()),
        Some("Mert Yilmaz")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirmed_move_is_announced(team: Team) {
    let card = seed_task(&team.tasks, "Ship build", TaskStatus::InProgress, None, None);
    let notifier = Arc::new(RecordingNotifier::new());
    let gateway = Arc::new(NotifyingTaskGateway::new(
        team.tasks.as_ref().clone(),
        Arc::clone(&notifier),
    ));
    let mut board = KanbanBoard::new(gateway);
    board.load().await.expect("board should load");

    board
        .apply_status_change(card.id(), TaskStatus::Done)
        .await
        .expect("move should be confirmed");

    let events = notifier.events().expect("events");
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events.first(),
        Some(TaskEvent::Updated(task)) if task.status() == TaskStatus::Done
    ));
}
