//! Per-scenario record of executed steps.
//!
//! Every robot operation appends a [`StepRecord`] with a unique id, a
//! timestamp, and the observed duration. A failing scenario can print the
//! journal to show exactly which step broke and how long the run spent
//! before it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single scripted interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Tap a located node.
    Tap {
        /// Description of the tap target.
        target: String,
    },
    /// Focus a field and type into it.
    TypeText {
        /// Description of the field.
        target: String,
        /// The text that was typed.
        text: String,
    },
    /// A single directional drag on a node.
    Swipe {
        /// Description of the dragged node.
        target: String,
        /// Direction of the drag.
        direction: String,
    },
    /// Vertical scroll until a node is visible.
    ScrollUntilVisible {
        /// The text scrolled toward.
        target: String,
    },
    /// Back-and-forth exercise of a horizontal row.
    Carousel {
        /// The card text used to grip the row.
        target: String,
    },
    /// Wall-clock wait for matching nodes to appear.
    WaitFor {
        /// Description of the awaited condition.
        target: String,
    },
    /// Wall-clock wait for matching nodes to disappear.
    WaitForGone {
        /// Description of the condition.
        target: String,
    },
    /// A state assertion.
    Assert {
        /// Description of the asserted condition.
        target: String,
    },
}

impl Step {
    /// Short static name for span metadata.
    pub fn name(&self) -> &'static str {
        match self {
            Step::Tap { .. } => "tap",
            Step::TypeText { .. } => "type_text",
            Step::Swipe { .. } => "swipe",
            Step::ScrollUntilVisible { .. } => "scroll_until_visible",
            Step::Carousel { .. } => "carousel",
            Step::WaitFor { .. } => "wait_for",
            Step::WaitForGone { .. } => "wait_for_gone",
            Step::Assert { .. } => "assert",
        }
    }
}

/// Whether a step succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepResult {
    /// The step completed.
    Success,
    /// The step failed with the given message.
    Failure(String),
}

/// One executed step with identity, timing, and outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Unique id for this record.
    pub id: Uuid,
    /// When the step started.
    pub timestamp: DateTime<Utc>,
    /// What was attempted.
    pub step: Step,
    /// How it ended.
    pub result: StepResult,
    /// Observed duration in milliseconds.
    pub duration_ms: u64,
}

impl StepRecord {
    /// Creates a record stamped with a fresh id and the current time.
    pub fn new(step: Step, result: StepResult, duration_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            step,
            result,
            duration_ms,
        }
    }
}

/// Ordered log of the steps a scenario has executed.
#[derive(Debug, Default)]
pub struct StepJournal {
    records: Vec<StepRecord>,
}

impl StepJournal {
    /// An empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn push(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    /// All records in execution order.
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One line per step, for failure output.
    pub fn summary(&self) -> String {
        self.records
            .iter()
            .map(|r| {
                let outcome = match &r.result {
                    StepResult::Success => "ok".to_string(),
                    StepResult::Failure(msg) => format!("FAILED: {}", msg),
                };
                format!("{} ({}ms) {}", r.step.name(), r.duration_ms, outcome)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
