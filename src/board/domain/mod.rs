//! Board grouping, drop target geometry, and the drag session state
//! machine. Nothing here performs I/O.

mod drag;
mod error;
mod geometry;
mod grouping;

pub use drag::{DragController, DragSession, DropOutcome, MoveRequest};
pub use error::DragError;
pub use geometry::{DropTarget, Point, Rect, closest_corners};
pub use grouping::BoardGrouping;
