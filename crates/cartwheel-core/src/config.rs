//! Suite configuration with environment overrides.
//!
//! Configuration loads from a JSON file named by `CARTWHEEL_CONFIG`; when the
//! variable is unset or the file is unreadable, defaults apply. The settle
//! scale can be overridden separately with `CARTWHEEL_SETTLE_SCALE`, which is
//! how CI runs set it to zero without shipping a config file.

use std::env;
use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::scroll::{CarouselConfig, ScrollConfig};
use crate::wait::WaitConfig;

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV: &str = "CARTWHEEL_CONFIG";

/// Environment variable overriding [`SuiteConfig::settle_scale`].
pub const SETTLE_SCALE_ENV: &str = "CARTWHEEL_SETTLE_SCALE";

/// Tuning for a whole scenario suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Vertical scroll helper tuning.
    pub scroll: ScrollConfig,
    /// Carousel helper tuning.
    pub carousel: CarouselConfig,
    /// Polling wait tuning.
    pub wait: WaitConfig,
    /// Base pause after screen transitions, in milliseconds.
    pub settle_ms: u64,
    /// Multiplier applied to every settle pause. Zero disables pauses,
    /// which suits backends that update the tree synchronously.
    pub settle_scale: f64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            carousel: CarouselConfig::default(),
            wait: WaitConfig::default(),
            settle_ms: 300,
            settle_scale: 1.0,
        }
    }
}

impl SuiteConfig {
    /// Loads configuration from the file named by [`CONFIG_ENV`], falling
    /// back to defaults, then applies the [`SETTLE_SCALE_ENV`] override.
    pub fn load() -> Self {
        let mut config = match env::var(CONFIG_ENV) {
            Ok(path) => match fs::read_to_string(&path) {
                Ok(contents) => match serde_json::from_str(&contents) {
                    Ok(config) => {
                        debug!(path = %path, "loaded suite config");
                        config
                    }
                    Err(e) => {
                        warn!(path = %path, error = %e, "invalid suite config, using defaults");
                        Self::default()
                    }
                },
                Err(e) => {
                    warn!(path = %path, error = %e, "unreadable suite config, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };

        if let Ok(raw) = env::var(SETTLE_SCALE_ENV) {
            match raw.parse::<f64>() {
                Ok(scale) if scale >= 0.0 => config.settle_scale = scale,
                _ => warn!(value = %raw, "ignoring invalid settle scale override"),
            }
        }
        config
    }

    /// A configuration tuned for the in-process backend: no settle pauses
    /// and tight polling.
    pub fn headless() -> Self {
        let mut config = Self::default();
        config.settle_scale = 0.0;
        config.wait.poll_interval_ms = 10;
        config
    }

    /// The base settle pause scaled by [`settle_scale`](Self::settle_scale),
    /// in milliseconds.
    pub fn scaled_settle_ms(&self) -> u64 {
        (self.settle_ms as f64 * self.settle_scale).round() as u64
    }

    /// The scaled settle pause as a [`Duration`].
    pub fn settle_duration(&self) -> Duration {
        Duration::from_millis(self.scaled_settle_ms())
    }

    /// The carousel config with its settle pause scaled.
    pub fn scaled_carousel(&self) -> CarouselConfig {
        let mut carousel = self.carousel.clone();
        carousel.settle_ms = (carousel.settle_ms as f64 * self.settle_scale).round() as u64;
        carousel
    }
}
