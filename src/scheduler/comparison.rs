//! Side-by-side policy comparison on cloned simulations

use serde::{Deserialize, Serialize};

use crate::scheduler::episode::{Episode, EpisodeReport};
use crate::simulation::Simulation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub seed: u64,
    pub baseline: EpisodeReport,
    pub challenger: EpisodeReport,
}

impl ComparisonReport {
    /// Challenger coverage minus baseline coverage
    pub fn coverage_delta(&self) -> f64 {
        self.challenger.metrics.coverage - self.baseline.metrics.coverage
    }

    /// Challenger elapsed time minus baseline elapsed time
    pub fn elapsed_delta(&self) -> f64 {
        self.challenger.metrics.elapsed - self.baseline.metrics.elapsed
    }
}

/// Run two episodes in lockstep on clones of `sim`
///
/// Both clones draw from the one shared random stream, one tick of each in
/// turn, so neither policy gets its own private sequence. `sim` itself is
/// left untouched apart from that shared stream.
pub fn compare_policies(
    sim: &Simulation,
    baseline: &mut Episode,
    challenger: &mut Episode,
) -> ComparisonReport {
    let mut base_sim = sim.clone();
    let mut challenger_sim = sim.clone();
    let mut base_done = None;
    let mut challenger_done = None;

    let (base_reason, challenger_reason) = loop {
        if base_done.is_none() {
            base_done = baseline.stop_reason(&base_sim);
            if base_done.is_none() {
                baseline.tick(&mut base_sim);
            }
        }
        if challenger_done.is_none() {
            challenger_done = challenger.stop_reason(&challenger_sim);
            if challenger_done.is_none() {
                challenger.tick(&mut challenger_sim);
            }
        }
        if let (Some(a), Some(b)) = (base_done, challenger_done) {
            break (a, b);
        }
    };

    let report = ComparisonReport {
        seed: sim.config().seed,
        baseline: baseline.report(&base_sim, base_reason),
        challenger: challenger.report(&challenger_sim, challenger_reason),
    };
    tracing::info!(
        baseline = %report.baseline.policy,
        challenger = %report.challenger.policy,
        coverage_delta = report.coverage_delta(),
        elapsed_delta = report.elapsed_delta(),
        "comparison finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ScenarioConfig, SimConfig};
    use crate::policy::PolicyKind;

    fn scenario() -> ScenarioConfig {
        ScenarioConfig {
            sim: SimConfig {
                size: 14,
                obstacle_prob: 0.0,
                max_steps: 40,
                ..SimConfig::default()
            },
            ..ScenarioConfig::default()
        }
    }

    #[test]
    fn test_compare_leaves_original_untouched() {
        let scenario = scenario();
        let sim = Simulation::new(scenario.sim.clone()).unwrap();
        let known_before = sim.known_cells();

        let mut a = Episode::from_scenario(PolicyKind::NearestFrontier, &scenario);
        let mut b = Episode::from_scenario(PolicyKind::HysteresisWeighted, &scenario);
        let report = compare_policies(&sim, &mut a, &mut b);

        assert_eq!(sim.known_cells(), known_before);
        assert_eq!(sim.steps(), 0);
        assert_eq!(report.baseline.policy, "nearest");
        assert_eq!(report.challenger.policy, "hysteresis");
        assert!(report.baseline.metrics.steps <= 40);
        assert!(report.challenger.metrics.steps <= 40);
    }

    #[test]
    fn test_identical_policies_match_without_jitter() {
        let scenario = scenario();
        let sim = Simulation::new(scenario.sim.clone()).unwrap();

        let mut a = Episode::from_scenario(PolicyKind::NearestFrontier, &scenario);
        let mut b = Episode::from_scenario(PolicyKind::NearestFrontier, &scenario);
        let report = compare_policies(&sim, &mut a, &mut b);

        assert_eq!(report.baseline.metrics, report.challenger.metrics);
        assert_eq!(report.coverage_delta(), 0.0);
    }
}
