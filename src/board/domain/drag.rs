//! Drag session state machine.

use tracing::debug;

use super::{BoardGrouping, DragError, DropTarget, Rect, closest_corners};
use crate::task::domain::{TaskId, TaskStatus};

/// State of one drag gesture, alive from start until drop or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    task_id: TaskId,
    origin: TaskStatus,
    over: Option<TaskStatus>,
}

impl DragSession {
    /// Returns the task being dragged.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the column the task was picked up from.
    #[must_use]
    pub const fn origin(&self) -> TaskStatus {
        self.origin
    }

    /// Returns the column currently hovered, if any.
    #[must_use]
    pub const fn over(&self) -> Option<TaskStatus> {
        self.over
    }
}

/// Status change requested by a completed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    /// Task to move.
    pub task_id: TaskId,
    /// Column the task was in when the gesture started.
    pub from: TaskStatus,
    /// Column the task was dropped on.
    pub to: TaskStatus,
}

/// Result of ending a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No gesture was active.
    NoSession,
    /// The gesture was cancelled.
    Cancelled(TaskId),
    /// The task was released outside every column.
    NoTarget(TaskId),
    /// The task was released on its own column.
    Unchanged(TaskId),
    /// The task was released on another column.
    Move(MoveRequest),
}

impl DropOutcome {
    /// Returns the requested move, if the gesture produced one.
    #[must_use]
    pub const fn move_request(&self) -> Option<MoveRequest> {
        match self {
            Self::Move(request) => Some(*request),
            Self::NoSession | Self::Cancelled(_) | Self::NoTarget(_) | Self::Unchanged(_) => None,
        }
    }
}

/// Tracks at most one drag gesture.
///
/// The controller starts idle, enters the dragging state on
/// [`DragController::start`], and always returns to idle on
/// [`DragController::drop`] or [`DragController::cancel`], whether or not a
/// later status change succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub const fn new() -> Self {
        Self { session: None }
    }

    /// Returns the active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Returns `true` while a gesture is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Picks up `task_id` from `grouping`.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::AlreadyDragging`] while another gesture is active
    /// and [`DragError::UnknownTask`] when the task is not on the board. The
    /// controller state is unchanged on error.
    pub fn start(&mut self, task_id: TaskId, grouping: &BoardGrouping) -> Result<(), DragError> {
        if let Some(active) = self.session {
            return Err(DragError::AlreadyDragging(active.task_id));
        }
        let origin = grouping
            .status_of(task_id)
            .ok_or(DragError::UnknownTask(task_id))?;
        debug!(task_id = %task_id, origin = %origin, "drag started");
        self.session = Some(DragSession {
            task_id,
            origin,
            over: None,
        });
        Ok(())
    }

    /// Records the column nearest to the dragged item and returns it.
    ///
    /// Does nothing while idle.
    pub fn hover(&mut self, dragged: &Rect, targets: &[DropTarget]) -> Option<TaskStatus> {
        let session = self.session.as_mut()?;
        session.over = closest_corners(dragged, targets);
        session.over
    }

    /// Records an explicitly chosen column, or none.
    ///
    /// Does nothing while idle.
    pub fn hover_target(&mut self, target: Option<TaskStatus>) {
        if let Some(session) = self.session.as_mut() {
            session.over = target;
        }
    }

    /// Releases the dragged task over the hovered column.
    pub fn drop(&mut self) -> DropOutcome {
        let Some(session) = self.session.take() else {
            return DropOutcome::NoSession;
        };
        let outcome = match session.over {
            None => DropOutcome::NoTarget(session.task_id),
            Some(target) if target == session.origin => DropOutcome::Unchanged(session.task_id),
            Some(target) => DropOutcome::Move(MoveRequest {
                task_id: session.task_id,
                from: session.origin,
                to: target,
            }),
        };
        debug!(task_id = %session.task_id, ?outcome, "drag ended");
        outcome
    }

    /// Abandons the gesture without requesting a change.
    pub fn cancel(&mut self) -> DropOutcome {
        self.session
            .take()
            .map_or(DropOutcome::NoSession, |session| {
                DropOutcome::Cancelled(session.task_id)
            })
    }
}
