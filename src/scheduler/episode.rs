//! Single-policy exploration run

use serde::{Deserialize, Serialize};

use crate::core::config::{ScanConfig, ScenarioConfig};
use crate::core::types::GridPos;
use crate::policy::{GoalPolicy, PolicyKind};
use crate::simulation::{MetricsSnapshot, Simulation, StepOutcome};

/// Externally predicted scan duration for `(simulation, robot index, goal)`
pub type ScanHint = Box<dyn Fn(&Simulation, usize, GridPos) -> Option<f64>>;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    CoverageReached,
    StepBudgetExhausted,
    /// No newly observed cell for `stall_ticks` consecutive ticks
    Stalled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub policy: String,
    pub stop_reason: StopReason,
    pub ticks: u64,
    pub metrics: MetricsSnapshot,
}

/// Drives a simulation with one policy, one tick at a time
///
/// A tick asks the policy for goals once, then calls `move_and_scan` for each
/// robot in order with the resolved scan duration.
pub struct Episode {
    policy: Box<dyn GoalPolicy>,
    scan: ScanConfig,
    stall_ticks: u64,
    scan_hint: Option<ScanHint>,
    ticks: u64,
    idle_ticks: u64,
}

impl Episode {
    pub fn new(policy: Box<dyn GoalPolicy>, scan: ScanConfig, stall_ticks: u64) -> Self {
        Self {
            policy,
            scan,
            stall_ticks: stall_ticks.max(1),
            scan_hint: None,
            ticks: 0,
            idle_ticks: 0,
        }
    }

    pub fn from_scenario(kind: PolicyKind, scenario: &ScenarioConfig) -> Self {
        Self::new(
            kind.build(&scenario.policy),
            scenario.scan.clone(),
            scenario.stall_ticks,
        )
    }

    /// Use an external scan-duration estimate when it has one
    pub fn with_scan_hint(
        mut self,
        hint: impl Fn(&Simulation, usize, GridPos) -> Option<f64> + 'static,
    ) -> Self {
        self.scan_hint = Some(Box::new(hint));
        self
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn stop_reason(&self, sim: &Simulation) -> Option<StopReason> {
        let config = sim.config();
        if sim.coverage() >= config.target_coverage {
            Some(StopReason::CoverageReached)
        } else if sim.steps() >= config.max_steps || self.ticks >= config.max_steps {
            // Ticks are capped too: ticks made only of unreachable goals
            // never advance the step counter
            Some(StopReason::StepBudgetExhausted)
        } else if self.idle_ticks >= self.stall_ticks {
            Some(StopReason::Stalled)
        } else {
            None
        }
    }

    pub fn tick(&mut self, sim: &mut Simulation) -> Vec<StepOutcome> {
        let known_before = sim.known_cells();
        let goals = self.policy.select_goals(sim);
        let clutter = sim.clutter();

        let mut outcomes = Vec::with_capacity(goals.len());
        for (robot_index, goal) in goals.into_iter().enumerate() {
            let hint = self
                .scan_hint
                .as_ref()
                .and_then(|hint| hint(sim, robot_index, goal));
            let duration = self.scan.resolve(hint, clutter);
            outcomes.push(sim.move_and_scan(robot_index, goal, duration));
        }

        if sim.known_cells() == known_before {
            self.idle_ticks += 1;
        } else {
            self.idle_ticks = 0;
        }
        self.ticks += 1;
        outcomes
    }

    /// Tick until a stop condition holds
    pub fn run(&mut self, sim: &mut Simulation) -> EpisodeReport {
        tracing::info!(
            policy = self.policy.name(),
            size = sim.size(),
            robots = sim.robots().len(),
            "episode started"
        );

        let reason = loop {
            if let Some(reason) = self.stop_reason(sim) {
                break reason;
            }
            self.tick(sim);
        };

        let report = self.report(sim, reason);
        tracing::info!(
            policy = self.policy.name(),
            ?reason,
            ticks = self.ticks,
            coverage = report.metrics.coverage,
            "episode finished"
        );
        report
    }

    pub fn report(&self, sim: &Simulation, stop_reason: StopReason) -> EpisodeReport {
        EpisodeReport {
            policy: self.policy.name().to_string(),
            stop_reason,
            ticks: self.ticks,
            metrics: sim.metrics(),
        }
    }
}
