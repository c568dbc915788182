use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::scenario::{ScenarioCtx, TourScenario};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct ScenarioRunner {
    verbose: bool,
}

impl ScenarioRunner {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Run `scenario` once per iteration, deriving each iteration's seed from
    /// the base seed so a failure can be replayed with `--seed`.
    pub fn run(&self, scenario: &TourScenario, ctx: &ScenarioCtx, iterations: usize) -> ScenarioResult {
        let mut failures = Vec::new();
        let mut timings = Vec::with_capacity(iterations);

        for iteration in 0..iterations {
            let seed = ctx.seed.wrapping_add(iteration as u64);
            let run_ctx = ScenarioCtx {
                seed,
                ..ctx.clone()
            };
            if self.verbose {
                println!("  {} {} (seed {seed})", "▶".cyan(), scenario.key);
            }
            let started = Instant::now();
            let outcome = scenario.run(&run_ctx);
            timings.push(started.elapsed());
            if let Err(err) = outcome {
                log::warn!("{} failed with seed {seed}: {err:#}", scenario.key);
                failures.push(format!("seed {seed}: {err:#}"));
            }
        }

        let successful_iterations = iterations - failures.len();
        ScenarioResult {
            scenario_name: scenario.key.to_string(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations,
            failures,
            average_duration: average(&timings),
        }
    }
}

fn average(timings: &[Duration]) -> Duration {
    let Ok(count) = u32::try_from(timings.len()) else {
        return Duration::ZERO;
    };
    if count == 0 {
        return Duration::ZERO;
    }
    timings.iter().sum::<Duration>() / count
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::get_scenario;
    use globetrot_tour::testing::location_at;
    use globetrot_tour::{Coordinate, TourConfig, TourOrder};

    fn ctx() -> ScenarioCtx {
        let config = TourConfig::default();
        let stops = vec![
            location_at("sylhet", 91.87, 24.89),
            location_at("bandarban", 92.22, 22.19),
            location_at("sajek", 92.29, 23.38),
        ];
        ScenarioCtx {
            order: TourOrder::resolve(Coordinate::new(90.41, 23.81), &stops),
            config,
            seed: 7,
            verbose: false,
        }
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average(&[]), Duration::ZERO);
        assert_eq!(
            average(&[Duration::from_millis(10), Duration::from_millis(30)]),
            Duration::from_millis(20)
        );
    }

    #[test]
    fn runner_counts_iterations() {
        let scenario = get_scenario("full-cycle").expect("scenario registered");
        let result = ScenarioRunner::new(false).run(&scenario, &ctx(), 3);
        assert!(result.passed, "failures: {:?}", result.failures);
        assert_eq!(result.iterations_run, 3);
        assert_eq!(result.successful_iterations, 3);
    }

    #[test]
    fn result_serializes_duration_as_millis() {
        let result = ScenarioResult {
            scenario_name: "teardown".into(),
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_millis(42),
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["average_duration"], 42);
        let back: ScenarioResult = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back.average_duration, Duration::from_millis(42));
    }
}
