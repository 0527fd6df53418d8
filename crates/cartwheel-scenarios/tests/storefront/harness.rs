use std::sync::{Arc, Once};

use cartwheel_core::config::SuiteConfig;
use cartwheel_core::robot::Robot;
use cartwheel_scenarios::sim::SimulatedStorefront;

static TRACING: Once = Once::new();

/// Install a test subscriber once; `RUST_LOG` controls verbosity.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A robot over a fresh storefront double, with all settle pauses disabled.
pub fn robot() -> Robot {
    robot_with_sim().0
}

/// Same as [`robot`], keeping a handle on the double for state assertions.
pub fn robot_with_sim() -> (Robot, Arc<SimulatedStorefront>) {
    init_tracing();
    let sim = Arc::new(SimulatedStorefront::new());
    let robot = Robot::new(sim.clone(), SuiteConfig::headless());
    (robot, sim)
}
