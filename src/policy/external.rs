//! Strategies composed from outside information
//!
//! Neither type knows where its inputs came from. A predictive service, a
//! replay file, or a test can all supply them.

use crate::core::config::ScanConfig;
use crate::core::types::GridPos;
use crate::policy::rerank::{candidates_for_robot, choose_ranked};
use crate::policy::{fallback_goal, GoalPolicy};
use crate::simulation::Simulation;

/// Goals chosen entirely outside the engine
///
/// Robots without an entry get the usual fallback goal; extra entries are
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct FixedGoals {
    pub goals: Vec<GridPos>,
}

impl FixedGoals {
    pub fn new(goals: Vec<GridPos>) -> Self {
        Self { goals }
    }
}

impl GoalPolicy for FixedGoals {
    fn name(&self) -> &str {
        "fixed"
    }

    fn select_goals(&self, sim: &Simulation) -> Vec<GridPos> {
        sim.robots()
            .iter()
            .enumerate()
            .map(|(i, robot)| {
                self.goals
                    .get(i)
                    .copied()
                    .unwrap_or_else(|| fallback_goal(sim, robot))
            })
            .collect()
    }
}

/// Minimise travel distance plus an externally estimated scan duration
#[derive(Clone)]
pub struct ScanCostPolicy<F> {
    scan: ScanConfig,
    hint: F,
}

impl<F> ScanCostPolicy<F>
where
    F: Fn(GridPos) -> Option<f64>,
{
    /// `hint` maps a frontier cell to a predicted scan duration in seconds
    pub fn new(scan: ScanConfig, hint: F) -> Self {
        Self { scan, hint }
    }
}

impl<F> GoalPolicy for ScanCostPolicy<F>
where
    F: Fn(GridPos) -> Option<f64>,
{
    fn name(&self) -> &str {
        "scan_cost"
    }

    fn select_goals(&self, sim: &Simulation) -> Vec<GridPos> {
        let frontiers = sim.frontiers();
        sim.robots()
            .iter()
            .map(|robot| {
                let candidates =
                    candidates_for_robot(sim, robot, &frontiers, &self.scan, &self.hint);
                choose_ranked(&candidates, &[])
                    .map(|c| c.goal)
                    .unwrap_or_else(|| fallback_goal(sim, robot))
            })
            .collect()
    }
}
