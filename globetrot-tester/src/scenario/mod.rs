use anyhow::Result;

use globetrot_tour::{TourConfig, TourOrder};

pub mod cycle;
pub mod harness;
pub mod interrupts;
pub mod resilience;

pub use harness::Harness;

/// Inputs shared by every scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub order: TourOrder,
    pub config: TourConfig,
    pub seed: u64,
    pub verbose: bool,
}

impl ScenarioCtx {
    /// Lap length in virtual milliseconds: zoom in, dwell, pull back.
    pub fn stop_ms(&self) -> u64 {
        millis(self.config.zoom_in_delay())
            + u64::from(self.config.show_duration_ms)
            + millis(self.config.zoom_mid_delay())
    }

    pub fn auto_start_ms(&self) -> u64 {
        u64::from(self.config.auto_start_delay_ms)
    }

    pub fn lap_ms(&self) -> u64 {
        self.stop_ms() * u64::try_from(self.order.len()).unwrap_or(u64::MAX)
    }
}

pub fn millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

type ScenarioFn = fn(&ScenarioCtx) -> Result<()>;

#[derive(Clone, Copy)]
pub struct TourScenario {
    pub key: &'static str,
    pub description: &'static str,
    run: ScenarioFn,
}

impl TourScenario {
    const fn new(key: &'static str, description: &'static str, run: ScenarioFn) -> Self {
        Self {
            key,
            description,
            run,
        }
    }

    /// # Errors
    ///
    /// Returns the first expectation the scenario found violated.
    pub fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        (self.run)(ctx)
    }
}

const SCENARIOS: [TourScenario; 7] = [
    TourScenario::new(
        "full-cycle",
        "Uninterrupted laps visit every stop in order, then the overview",
        cycle::full_cycle,
    ),
    TourScenario::new(
        "manual-selection",
        "Picking a marker mid-flight cancels the running cycle",
        interrupts::manual_selection,
    ),
    TourScenario::new(
        "idle-resume",
        "Map gestures hold the tour until the idle window passes",
        interrupts::idle_resume,
    ),
    TourScenario::new(
        "pause-resume",
        "Pausing freezes every phase; resuming re-enters it",
        interrupts::pause_resume,
    ),
    TourScenario::new(
        "teardown",
        "Unmounting with timers outstanding stops all mutation",
        resilience::teardown,
    ),
    TourScenario::new(
        "interaction-storm",
        "Seeded random events never break engine invariants",
        resilience::interaction_storm,
    ),
    TourScenario::new(
        "camera-failure",
        "Rejected camera flights do not stall the tour",
        resilience::camera_failure,
    ),
];

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description))
}

pub fn get_scenario(key: &str) -> Option<TourScenario> {
    SCENARIOS.iter().find(|s| s.key == key).copied()
}

pub fn all_keys() -> Vec<String> {
    SCENARIOS.iter().map(|s| s.key.to_string()).collect()
}
