//! High-level scenario robot.
//!
//! [`Robot`] wraps a [`UiDriver`] with the vocabulary scenario scripts speak:
//! tap this text, type into that field, scroll until something is visible,
//! assert it is displayed. Every operation runs inside a tracing span, is
//! timed, and lands in the step journal so a failing scenario can replay
//! what happened.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use tracing::{debug, info_span, Instrument};

use crate::config::SuiteConfig;
use crate::driver::{Lookup, UiDriver};
use crate::element::SemanticsNode;
use crate::error::FlowError;
use crate::journal::{Step, StepJournal, StepRecord, StepResult};
use crate::matcher::NodeMatcher;
use crate::scroll::{self, CarouselConfig};
use crate::wait::{self, WaitConfig};

/// Drives scenario scripts against any [`UiDriver`] backend.
pub struct Robot {
    driver: Arc<dyn UiDriver>,
    config: SuiteConfig,
    journal: Mutex<StepJournal>,
}

impl Robot {
    /// Creates a robot over a connected driver.
    pub fn new(driver: Arc<dyn UiDriver>, config: SuiteConfig) -> Self {
        Self {
            driver,
            config,
            journal: Mutex::new(StepJournal::new()),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// The underlying driver, for backend-specific calls in test harnesses.
    pub fn driver(&self) -> &Arc<dyn UiDriver> {
        &self.driver
    }

    /// A copy of the step summary, one line per executed step.
    pub fn journal_summary(&self) -> String {
        self.lock_journal().summary()
    }

    /// Number of journaled steps.
    pub fn steps_taken(&self) -> usize {
        self.lock_journal().len()
    }

    fn lock_journal(&self) -> std::sync::MutexGuard<'_, StepJournal> {
        self.journal.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn step<T, F>(&self, step: Step, op: F) -> Result<T, FlowError>
    where
        F: Future<Output = Result<T, FlowError>>,
    {
        let span = info_span!("step", step = step.name());
        let started = Instant::now();
        let result = op.instrument(span).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let outcome = match &result {
            Ok(_) => StepResult::Success,
            Err(e) => StepResult::Failure(e.to_string()),
        };
        debug!(
            step = step.name(),
            elapsed_ms,
            success = result.is_ok(),
            "step complete"
        );
        self.lock_journal()
            .push(StepRecord::new(step, outcome, elapsed_ms));
        result
    }

    async fn require_visible(
        &self,
        matcher: &NodeMatcher,
        index: usize,
    ) -> Result<SemanticsNode, FlowError> {
        match self.driver.lookup_nth(matcher, index).await? {
            Lookup::Visible(node) => Ok(node),
            Lookup::Hidden(_) | Lookup::Absent => Err(FlowError::Missing {
                target: matcher.describe(),
            }),
        }
    }

    async fn tap_node(&self, node: &SemanticsNode) -> Result<(), FlowError> {
        let center = node.center().ok_or_else(|| {
            FlowError::Assertion(format!(
                "node '{}' has no layout frame",
                node.text.as_deref().unwrap_or("<unnamed>")
            ))
        })?;
        self.driver.tap(center).await?;
        Ok(())
    }

    /// Taps the first visible node with exactly this text.
    pub async fn tap_text(&self, text: &str) -> Result<(), FlowError> {
        let matcher = NodeMatcher::text(text);
        self.step(
            Step::Tap {
                target: text.to_string(),
            },
            async {
                let node = self.require_visible(&matcher, 0).await?;
                self.tap_node(&node).await
            },
        )
        .await
    }

    /// Taps the first visible node accepted by an arbitrary matcher.
    pub async fn tap_matching(&self, matcher: &NodeMatcher) -> Result<(), FlowError> {
        self.step(
            Step::Tap {
                target: matcher.describe(),
            },
            async {
                let node = self.require_visible(matcher, 0).await?;
                self.tap_node(&node).await
            },
        )
        .await
    }

    /// Taps a field to focus it, then types into it.
    pub async fn type_into(&self, field: &NodeMatcher, text: &str) -> Result<(), FlowError> {
        self.step(
            Step::TypeText {
                target: field.describe(),
                text: text.to_string(),
            },
            async {
                let node = self.require_visible(field, 0).await?;
                self.tap_node(&node).await?;
                self.driver.type_text(text).await?;
                Ok(())
            },
        )
        .await
    }

    /// Asserts that a node with exactly this text is displayed on screen.
    ///
    /// Distinguishes the two failure shapes: present in the tree but
    /// scrolled away, versus not present at all.
    pub async fn assert_displayed(&self, text: &str) -> Result<(), FlowError> {
        let matcher = NodeMatcher::text(text);
        self.assert_matcher_displayed(&matcher).await
    }

    /// Asserts that a node whose text contains `fragment` is displayed.
    pub async fn assert_displayed_substring(&self, fragment: &str) -> Result<(), FlowError> {
        let matcher = NodeMatcher::text_substring(fragment);
        self.assert_matcher_displayed(&matcher).await
    }

    async fn assert_matcher_displayed(&self, matcher: &NodeMatcher) -> Result<(), FlowError> {
        self.step(
            Step::Assert {
                target: format!("{} displayed", matcher.describe()),
            },
            async {
                match self.driver.lookup(matcher).await? {
                    Lookup::Visible(_) => Ok(()),
                    Lookup::Hidden(_) => Err(FlowError::Assertion(format!(
                        "{} is present in the tree but not displayed",
                        matcher.describe()
                    ))),
                    Lookup::Absent => Err(FlowError::Assertion(format!(
                        "{} is not present in the tree",
                        matcher.describe()
                    ))),
                }
            },
        )
        .await
    }

    /// Scrolls the screen upward until `text` is visible, within the
    /// configured attempt budget.
    pub async fn scroll_until_visible(&self, text: &str) -> Result<(), FlowError> {
        self.step(
            Step::ScrollUntilVisible {
                target: text.to_string(),
            },
            scroll::swipe_until_visible(self.driver.as_ref(), text, &self.config.scroll),
        )
        .await
    }

    /// Exercises the horizontal row containing the `occurrence`-th node with
    /// this text, dragging it left and right.
    pub async fn exercise_carousel(&self, text: &str, occurrence: usize) -> Result<(), FlowError> {
        let carousel = self.config.scaled_carousel();
        self.step(
            Step::Carousel {
                target: text.to_string(),
            },
            scroll::swipe_back_and_forth(self.driver.as_ref(), text, occurrence, &carousel),
        )
        .await
    }

    /// A single leftward drag on the `occurrence`-th node with this text.
    pub async fn swipe_node_left(&self, text: &str, occurrence: usize) -> Result<(), FlowError> {
        self.directional_swipe(text, occurrence, true).await
    }

    /// A single rightward drag on the `occurrence`-th node with this text.
    pub async fn swipe_node_right(&self, text: &str, occurrence: usize) -> Result<(), FlowError> {
        self.directional_swipe(text, occurrence, false).await
    }

    async fn directional_swipe(
        &self,
        text: &str,
        occurrence: usize,
        leftward: bool,
    ) -> Result<(), FlowError> {
        let matcher = NodeMatcher::text(text);
        let carousel: CarouselConfig = self.config.carousel.clone();
        self.step(
            Step::Swipe {
                target: text.to_string(),
                direction: if leftward { "left" } else { "right" }.to_string(),
            },
            async {
                let node = self.require_visible(&matcher, occurrence).await?;
                let frame = node.frame.ok_or_else(|| {
                    FlowError::Assertion(format!("node '{}' has no layout frame", text))
                })?;
                let gesture = if leftward {
                    crate::gesture::SwipeGesture::leftward_across(
                        &frame,
                        carousel.swipe_distance,
                        carousel.swipe_duration_ms,
                    )
                } else {
                    crate::gesture::SwipeGesture::rightward_across(
                        &frame,
                        carousel.swipe_distance,
                        carousel.swipe_duration_ms,
                    )
                };
                self.driver.perform_swipe(&gesture).await?;
                Ok(())
            },
        )
        .await
    }

    /// Waits until at least `min_count` nodes match, with an optional
    /// timeout override in milliseconds.
    pub async fn wait_for_count(
        &self,
        matcher: &NodeMatcher,
        min_count: usize,
        timeout_ms: Option<u64>,
    ) -> Result<Vec<SemanticsNode>, FlowError> {
        let wait_config = self.wait_config(timeout_ms);
        self.step(
            Step::WaitFor {
                target: matcher.describe(),
            },
            wait::wait_for_count(self.driver.as_ref(), matcher, min_count, &wait_config),
        )
        .await
    }

    /// Waits until no node matches, with an optional timeout override.
    pub async fn wait_for_gone(
        &self,
        matcher: &NodeMatcher,
        timeout_ms: Option<u64>,
    ) -> Result<(), FlowError> {
        let wait_config = self.wait_config(timeout_ms);
        self.step(
            Step::WaitForGone {
                target: matcher.describe(),
            },
            wait::wait_for_gone(self.driver.as_ref(), matcher, &wait_config),
        )
        .await
    }

    fn wait_config(&self, timeout_ms: Option<u64>) -> WaitConfig {
        let mut wait_config = self.config.wait.clone();
        if let Some(timeout) = timeout_ms {
            wait_config.timeout_ms = timeout;
        }
        wait_config
    }

    /// Pauses for the scaled settle duration. Not journaled; this is pacing,
    /// not interaction.
    pub async fn settle(&self) {
        let duration = self.config.settle_duration();
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
