//! Shared semantics-tree types for UI automation.
//!
//! This module defines the data structures representing UI elements as
//! reported by an automation backend, plus the screen-coordinate geometry
//! used for gesture synthesis and visibility checks. These types are
//! independent of any specific backend implementation.

use serde::{Deserialize, Serialize};

/// A point in screen coordinates (logical pixels, origin at the top-left
/// corner of the screen).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// The x-coordinate in logical pixels.
    pub x: f64,
    /// The y-coordinate in logical pixels.
    pub y: f64,
}

impl Point {
    /// Creates a point at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The frame (position and dimensions) of a semantics node.
///
/// Coordinates are in logical pixels with the origin at the top-left corner
/// of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeFrame {
    /// The x-coordinate of the node's top-left corner.
    pub x: f64,
    /// The y-coordinate of the node's top-left corner.
    pub y: f64,
    /// The width of the node in logical pixels.
    pub width: f64,
    /// The height of the node in logical pixels.
    pub height: f64,
}

impl NodeFrame {
    /// Creates a frame from its top-left corner and dimensions.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The center point of this frame.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when the point lies within this frame.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// True when this frame overlaps `other` with positive area.
    ///
    /// Frames that merely touch edges do not intersect.
    pub fn intersects(&self, other: &NodeFrame) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// One element of the application's current semantics tree.
///
/// A node is a transient view into live application state: any gesture that
/// mutates the tree invalidates previously fetched nodes, so consumers
/// re-query after every scroll rather than hold nodes across one. Nodes form
/// a tree via the `children` field and have no identity beyond the query
/// that produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticsNode {
    /// The user-visible text of this node, if any.
    #[serde(default)]
    pub text: Option<String>,

    /// The current value of an editable node (e.g. text field contents).
    #[serde(default)]
    pub value: Option<String>,

    /// The semantic role of this node (e.g. "Button", "SearchField").
    #[serde(default)]
    pub role: Option<String>,

    /// The node's frame in screen coordinates. Absent when the node exists
    /// in the tree but has not been laid out.
    #[serde(default)]
    pub frame: Option<NodeFrame>,

    /// Whether the node accepts tap input.
    #[serde(default)]
    pub clickable: bool,

    /// Whether the node accepts text input.
    #[serde(default)]
    pub editable: bool,

    /// Child nodes nested within this node.
    #[serde(default)]
    pub children: Vec<SemanticsNode>,
}

impl SemanticsNode {
    /// True when the node is laid out with a non-empty frame that overlaps
    /// the given viewport.
    ///
    /// Presence in the tree is not enough: a node scrolled off-screen keeps
    /// its frame but no longer intersects the viewport.
    pub fn is_displayed_in(&self, viewport: &NodeFrame) -> bool {
        match &self.frame {
            Some(frame) => frame.width > 0.0 && frame.height > 0.0 && frame.intersects(viewport),
            None => false,
        }
    }

    /// The center of the node's frame, if laid out.
    pub fn center(&self) -> Option<Point> {
        self.frame.as_ref().map(NodeFrame::center)
    }
}
