//! Automation driver trait for backend-agnostic UI automation.
//!
//! This module defines the [`UiDriver`] trait, a common interface over
//! different automation backends (a TCP agent embedded in the application, or
//! an in-process application double for headless runs). Helpers and scenario
//! scripts work against the trait without knowing the backend.
//!
//! The trait provides default implementations for node search and visibility
//! lookup that fetch the full tree via [`dump_tree`](UiDriver::dump_tree) and
//! evaluate locally; backends with server-side search can override them.

use async_trait::async_trait;
use thiserror::Error;

use crate::element::{NodeFrame, Point, SemanticsNode};
use crate::gesture::SwipeGesture;
use crate::matcher::{self, NodeMatcher};

/// Errors that can occur during driver operations.
///
/// Unifies failures from all backends behind a single type so consumers can
/// handle them uniformly.
#[derive(Error, Debug)]
pub enum DriverError {
    /// A command or operation failed with the given message.
    #[error("command failed: {0}")]
    CommandFailed(String),

    /// The backend is not available or not connected.
    #[error("not connected to automation backend")]
    NotConnected,

    /// The connection to the agent was lost.
    #[error("connection lost: {0}")]
    ConnectionLost(String),

    /// An operation timed out at the transport level.
    #[error("operation timed out")]
    Timeout,

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse wire data.
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

/// Outcome of a single visibility lookup.
///
/// `Hidden` and `Absent` are expected transient states inside bounded polling
/// loops and flow through ordinary conditionals; errors are reserved for
/// budget exhaustion and transport failures.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// A matching node exists and overlaps the viewport.
    Visible(SemanticsNode),
    /// A matching node exists in the tree but is not on screen.
    Hidden(SemanticsNode),
    /// No matching node exists in the tree.
    Absent,
}

impl Lookup {
    /// True for [`Lookup::Visible`].
    pub fn is_visible(&self) -> bool {
        matches!(self, Lookup::Visible(_))
    }
}

/// Trait for backend-agnostic semantics-tree UI automation.
///
/// Implementors provide the gesture and query primitives; the default
/// methods layer matcher search and visibility classification on top.
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Establish the connection to the automation backend.
    async fn connect(&mut self) -> Result<(), DriverError>;

    /// Check if the backend is ready to accept commands.
    fn is_connected(&self) -> bool;

    /// Get the full semantics tree for the current screen.
    async fn dump_tree(&self) -> Result<Vec<SemanticsNode>, DriverError>;

    /// The screen area currently visible to the user.
    async fn viewport(&self) -> Result<NodeFrame, DriverError>;

    /// Tap at a point in screen coordinates.
    async fn tap(&self, point: Point) -> Result<(), DriverError>;

    /// Type text into the currently focused editor.
    async fn type_text(&self, text: &str) -> Result<(), DriverError>;

    /// Perform a drag gesture.
    async fn perform_swipe(&self, gesture: &SwipeGesture) -> Result<(), DriverError>;

    /// All nodes in the current tree accepted by the matcher, in document
    /// order.
    async fn find_nodes(&self, matcher: &NodeMatcher) -> Result<Vec<SemanticsNode>, DriverError> {
        let tree = self.dump_tree().await?;
        Ok(matcher::find_all(&tree, matcher))
    }

    /// Tri-state visibility lookup of the first match.
    async fn lookup(&self, matcher: &NodeMatcher) -> Result<Lookup, DriverError> {
        self.lookup_nth(matcher, 0).await
    }

    /// Tri-state visibility lookup of the nth match (0-based, document
    /// order). Visibility means the node's frame overlaps the viewport,
    /// not mere presence in the tree.
    async fn lookup_nth(
        &self,
        matcher: &NodeMatcher,
        index: usize,
    ) -> Result<Lookup, DriverError> {
        let nodes = self.find_nodes(matcher).await?;
        match nodes.into_iter().nth(index) {
            None => Ok(Lookup::Absent),
            Some(node) => {
                let viewport = self.viewport().await?;
                if node.is_displayed_in(&viewport) {
                    Ok(Lookup::Visible(node))
                } else {
                    Ok(Lookup::Hidden(node))
                }
            }
        }
    }
}
