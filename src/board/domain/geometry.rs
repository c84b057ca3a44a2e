//! Drop target geometry and the nearest-corner collision rule.

use crate::task::domain::TaskStatus;

/// A point in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl Point {
    #[expect(
        clippy::float_arithmetic,
        reason = "collision scoring is defined over floating point distances"
    )]
    fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a box from its top-left corner and size.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns the corners in top-left, top-right, bottom-left,
    /// bottom-right order.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "corner coordinates are offsets of floating point edges"
    )]
    pub fn corners(&self) -> [Point; 4] {
        let right = self.left + self.width;
        let bottom = self.top + self.height;
        [
            Point { x: self.left, y: self.top },
            Point { x: right, y: self.top },
            Point { x: self.left, y: bottom },
            Point { x: right, y: bottom },
        ]
    }

    /// Sums the distances between this box's corners and the matching
    /// corners of `other`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "collision scoring is defined over floating point distances"
    )]
    pub fn corner_distance(&self, other: &Self) -> f64 {
        self.corners()
            .into_iter()
            .zip(other.corners())
            .map(|(own, theirs)| own.distance_to(theirs))
            .fold(0.0, |total, distance| total + distance)
    }
}

/// A board column that accepts drops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropTarget {
    /// Status of the column.
    pub status: TaskStatus,
    /// Bounding box of the column.
    pub rect: Rect,
}

impl DropTarget {
    /// Creates a drop target.
    #[must_use]
    pub const fn new(status: TaskStatus, rect: Rect) -> Self {
        Self { status, rect }
    }
}

/// Picks the target whose corners are nearest to the dragged item's
/// corners.
///
/// Exact ties go to the earliest target in `targets`. Returns `None` when
/// there are no targets.
#[must_use]
pub fn closest_corners(dragged: &Rect, targets: &[DropTarget]) -> Option<TaskStatus> {
    let mut best: Option<(f64, TaskStatus)> = None;
    for target in targets {
        let score = dragged.corner_distance(&target.rect);
        let closer = best.is_none_or(|(best_score, _)| score.total_cmp(&best_score).is_lt());
        if closer {
            best = Some((score, target.status));
        }
    }
    best.map(|(_, status)| status)
}
