//! Shared world state for kanban drag-and-drop BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use rstest::fixture;
use teamboard::{
    board::{
        domain::{DragController, DropTarget, Rect},
        services::{BoardResult, KanbanBoard, StatusChangeOutcome},
    },
    task::{
        adapters::memory::InMemoryTaskGateway,
        domain::{TaskId, TaskStatus},
    },
};

/// Width of one board column in the simulated layout.
pub const COLUMN_WIDTH: f64 = 280.0;

/// Scenario world for kanban drag behaviour tests.
pub struct KanbanWorld {
    pub gateway: Arc<InMemoryTaskGateway>,
    pub board: KanbanBoard<InMemoryTaskGateway>,
    pub drag: DragController,
    pub seeded: HashMap<TaskStatus, TaskId>,
    pub dragged: Option<TaskId>,
    pub last_result: Option<BoardResult<StatusChangeOutcome>>,
}

impl KanbanWorld {
    /// Creates a world over an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        let gateway = Arc::new(InMemoryTaskGateway::new());
        Self {
            board: KanbanBoard::new(Arc::clone(&gateway)),
            gateway,
            drag: DragController::new(),
            seeded: HashMap::new(),
            dragged: None,
            last_result: None,
        }
    }

    /// Column rectangles laid out left to right in status order.
    #[must_use]
    pub fn columns() -> Vec<DropTarget> {
        TaskStatus::ALL
            .into_iter()
            .zip([0.0, 300.0, 600.0])
            .map(|(status, left)| {
                DropTarget::new(status, Rect::new(left, 0.0, COLUMN_WIDTH, 720.0))
            })
            .collect()
    }
}

impl Default for KanbanWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> KanbanWorld {
    KanbanWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
