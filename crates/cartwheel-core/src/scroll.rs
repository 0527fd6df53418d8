//! Bounded scroll and carousel helpers.
//!
//! [`swipe_until_visible`] is the workhorse for content below the fold: it
//! alternates a visibility check with an upward swipe until the target is on
//! screen or a fixed attempt budget runs out. [`swipe_back_and_forth`]
//! exercises a horizontal row by dragging one of its cards left and then
//! right a fixed number of times.
//!
//! Both helpers re-query geometry before every gesture. Layout shifts while
//! content scrolls, so nothing from a previous attempt is trusted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::driver::{Lookup, UiDriver};
use crate::error::FlowError;
use crate::gesture::SwipeGesture;
use crate::matcher::NodeMatcher;

/// Tuning for [`swipe_until_visible`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Maximum number of upward swipes before giving up.
    pub max_attempts: u32,
    /// Vertical swipe distance in logical pixels.
    pub swipe_distance: f64,
    /// Duration of each swipe in milliseconds.
    pub swipe_duration_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 15,
            swipe_distance: 1000.0,
            swipe_duration_ms: 300,
        }
    }
}

/// Tuning for [`swipe_back_and_forth`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Horizontal swipe distance in logical pixels.
    pub swipe_distance: f64,
    /// Duration of each swipe in milliseconds.
    pub swipe_duration_ms: u64,
    /// Pause after each swipe so row animation can finish. Zero skips the
    /// pause entirely.
    pub settle_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            swipe_distance: 800.0,
            swipe_duration_ms: 300,
            settle_ms: 300,
        }
    }
}

/// Swipes issued in each direction by [`swipe_back_and_forth`].
pub const SWIPES_PER_DIRECTION: usize = 3;

/// Scrolls the screen upward until a node with exactly `target` text is
/// visible.
///
/// The check runs before each swipe, so a target already on screen costs
/// zero gestures and success on attempt `n` issues at most `n - 1` swipes.
/// Presence in the tree is not enough; the node's frame must overlap the
/// viewport. Exhausting the budget yields [`FlowError::NotFound`] naming the
/// target and the attempt count.
pub async fn swipe_until_visible(
    driver: &dyn UiDriver,
    target: &str,
    config: &ScrollConfig,
) -> Result<(), FlowError> {
    if target.is_empty() {
        return Err(FlowError::Assertion(
            "scroll target text must not be empty".to_string(),
        ));
    }

    let matcher = NodeMatcher::text(target);
    for attempt in 1..=config.max_attempts {
        if driver.lookup(&matcher).await?.is_visible() {
            debug!(element = target, attempt, "target visible, stopping scroll");
            return Ok(());
        }

        let viewport = driver.viewport().await?;
        let gesture = SwipeGesture::upward_from_center(
            &viewport,
            config.swipe_distance,
            config.swipe_duration_ms,
        );
        debug!(element = target, attempt, "target not visible, swiping up");
        driver.perform_swipe(&gesture).await?;
    }

    Err(FlowError::NotFound {
        target: target.to_string(),
        attempts: config.max_attempts,
    })
}

/// Drags the `occurrence`-th node matching `target` (0-based, document order)
/// left [`SWIPES_PER_DIRECTION`] times and then right the same number of
/// times, pausing `settle_ms` after each drag.
///
/// Fails fast with [`FlowError::Missing`] before issuing any gesture when the
/// node is not visible. Each drag re-queries the node's current frame since
/// the row moves under the finger between swipes.
pub async fn swipe_back_and_forth(
    driver: &dyn UiDriver,
    target: &str,
    occurrence: usize,
    config: &CarouselConfig,
) -> Result<(), FlowError> {
    let matcher = NodeMatcher::text(target);
    match driver.lookup_nth(&matcher, occurrence).await? {
        Lookup::Visible(_) => {}
        Lookup::Hidden(_) | Lookup::Absent => {
            return Err(FlowError::Missing {
                target: target.to_string(),
            });
        }
    }

    for direction in [Direction::Left, Direction::Right] {
        for pass in 0..SWIPES_PER_DIRECTION {
            let node = match driver.lookup_nth(&matcher, occurrence).await? {
                Lookup::Visible(node) | Lookup::Hidden(node) => node,
                Lookup::Absent => {
                    return Err(FlowError::Missing {
                        target: target.to_string(),
                    });
                }
            };
            let frame = node.frame.ok_or_else(|| {
                FlowError::Assertion(format!("node '{}' has no layout frame", target))
            })?;
            let gesture = match direction {
                Direction::Left => SwipeGesture::leftward_across(
                    &frame,
                    config.swipe_distance,
                    config.swipe_duration_ms,
                ),
                Direction::Right => SwipeGesture::rightward_across(
                    &frame,
                    config.swipe_distance,
                    config.swipe_duration_ms,
                ),
            };
            debug!(element = target, ?direction, pass, "carousel swipe");
            driver.perform_swipe(&gesture).await?;
            settle(config.settle_ms).await;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Left,
    Right,
}

async fn settle(millis: u64) {
    if millis > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
    }
}
