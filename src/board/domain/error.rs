//! Drag gesture errors.

use crate::task::domain::TaskId;
use thiserror::Error;

/// Errors returned when a drag gesture cannot start.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DragError {
    /// Another task is already being dragged.
    #[error("task {0} is already being dragged")]
    AlreadyDragging(TaskId),

    /// The task is not on the board.
    #[error("task {0} is not on the board")]
    UnknownTask(TaskId),
}
