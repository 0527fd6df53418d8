//! Wall-clock waits for asynchronously produced content.
//!
//! Some UI state appears only after background work finishes (search results,
//! navigation transitions). These helpers poll the tree until a condition
//! holds or a timeout elapses. They test presence in the tree, not
//! displayedness; use the scroll helpers when something must be on screen.

use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Duration, Instant};
use tracing::debug;

use crate::driver::UiDriver;
use crate::element::SemanticsNode;
use crate::error::FlowError;
use crate::matcher::NodeMatcher;

/// Tuning for the polling waits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Total wall-clock budget in milliseconds.
    pub timeout_ms: u64,
    /// Delay between tree dumps in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            poll_interval_ms: 100,
        }
    }
}

/// Polls until at least `min_count` nodes match, returning the matches.
///
/// Matches are counted anywhere in the tree, on screen or not. Exceeding the
/// budget yields [`FlowError::Timeout`] describing the matcher.
pub async fn wait_for_count(
    driver: &dyn UiDriver,
    matcher: &NodeMatcher,
    min_count: usize,
    config: &WaitConfig,
) -> Result<Vec<SemanticsNode>, FlowError> {
    let deadline = Instant::now() + Duration::from_millis(config.timeout_ms);
    loop {
        let nodes = driver.find_nodes(matcher).await?;
        if nodes.len() >= min_count {
            debug!(
                matched = nodes.len(),
                condition = %matcher.describe(),
                "wait condition met"
            );
            return Ok(nodes);
        }
        if Instant::now() >= deadline {
            return Err(FlowError::Timeout {
                target: matcher.describe(),
                timeout_ms: config.timeout_ms,
            });
        }
        sleep(Duration::from_millis(config.poll_interval_ms)).await;
    }
}

/// Polls until no node matches.
pub async fn wait_for_gone(
    driver: &dyn UiDriver,
    matcher: &NodeMatcher,
    config: &WaitConfig,
) -> Result<(), FlowError> {
    let deadline = Instant::now() + Duration::from_millis(config.timeout_ms);
    loop {
        let nodes = driver.find_nodes(matcher).await?;
        if nodes.is_empty() {
            debug!(condition = %matcher.describe(), "node gone");
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(FlowError::Timeout {
                target: format!("{} to disappear", matcher.describe()),
                timeout_ms: config.timeout_ms,
            });
        }
        sleep(Duration::from_millis(config.poll_interval_ms)).await;
    }
}
