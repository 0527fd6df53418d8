//! Failure taxonomy for scripted UI flows.
//!
//! Every variant is fatal to the current scenario and propagates to the test
//! harness; nothing is retried above the bounded polling loops that produce
//! these errors. Messages carry the target text and the exhausted budget so a
//! failing run names the UI state that was never reached.

use thiserror::Error;

use crate::driver::DriverError;

/// A failure raised by a scripted UI flow.
#[derive(Error, Debug)]
pub enum FlowError {
    /// The scroll budget ran out before the target became visible.
    #[error("element with text '{target}' not visible after {attempts} swipe attempts")]
    NotFound {
        /// The text that was searched for.
        target: String,
        /// How many scroll attempts were made.
        attempts: u32,
    },

    /// A fail-fast locate found nothing on screen (no gestures were issued).
    #[error("element '{target}' is not on screen")]
    Missing {
        /// The text that was searched for.
        target: String,
    },

    /// A wall-clock wait ran out before its condition held.
    #[error("timed out after {timeout_ms}ms waiting for {target}")]
    Timeout {
        /// Description of the awaited condition.
        target: String,
        /// The timeout budget in milliseconds.
        timeout_ms: u64,
    },

    /// A post-condition check failed after location succeeded.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// A transport or backend failure.
    #[error(transparent)]
    Driver(#[from] DriverError),
}
