//! Board orchestration over the task gateway.

mod board;

pub use board::{BoardError, BoardResult, KanbanBoard, PendingStatusChange, StatusChangeOutcome};
