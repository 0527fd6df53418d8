//! Swipe gesture descriptors.
//!
//! A gesture is computed from on-screen geometry at the moment of the call
//! and never cached: layout can shift between attempts, so callers rebuild
//! the descriptor from a freshly queried frame each time.

use crate::element::{NodeFrame, Point};

/// A drag from `start` to `end` over `duration_ms` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeGesture {
    /// Where the drag begins, in screen coordinates.
    pub start: Point,
    /// Where the drag ends, in screen coordinates.
    pub end: Point,
    /// Duration of the drag in milliseconds.
    pub duration_ms: u64,
}

impl SwipeGesture {
    /// Creates a gesture between two explicit points.
    pub fn new(start: Point, end: Point, duration_ms: u64) -> Self {
        Self {
            start,
            end,
            duration_ms,
        }
    }

    /// A vertical drag from the area's center upward by `distance`,
    /// simulating the finger motion that reveals content below.
    pub fn upward_from_center(area: &NodeFrame, distance: f64, duration_ms: u64) -> Self {
        let center = area.center();
        Self {
            start: center,
            end: Point::new(center.x, center.y - distance),
            duration_ms,
        }
    }

    /// A horizontal drag across the frame's center, right to left.
    pub fn leftward_across(frame: &NodeFrame, distance: f64, duration_ms: u64) -> Self {
        let center = frame.center();
        Self {
            start: Point::new(center.x + distance / 2.0, center.y),
            end: Point::new(center.x - distance / 2.0, center.y),
            duration_ms,
        }
    }

    /// A horizontal drag across the frame's center, left to right.
    pub fn rightward_across(frame: &NodeFrame, distance: f64, duration_ms: u64) -> Self {
        let center = frame.center();
        Self {
            start: Point::new(center.x - distance / 2.0, center.y),
            end: Point::new(center.x + distance / 2.0, center.y),
            duration_ms,
        }
    }

    /// The (dx, dy) displacement of this gesture.
    pub fn delta(&self) -> (f64, f64) {
        (self.end.x - self.start.x, self.end.y - self.start.y)
    }

    /// True when the gesture moves further horizontally than vertically.
    pub fn is_horizontal(&self) -> bool {
        let (dx, dy) = self.delta();
        dx.abs() > dy.abs()
    }
}
