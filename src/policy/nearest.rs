//! Nearest-frontier policy

use crate::core::types::GridPos;
use crate::policy::{select_by_score, GoalPolicy};
use crate::simulation::Simulation;

/// Walk to the closest frontier vantage; the first frontier in scan order
/// wins ties. Draws nothing from the random stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestFrontier;

impl GoalPolicy for NearestFrontier {
    fn name(&self) -> &str {
        "nearest"
    }

    fn select_goals(&self, sim: &Simulation) -> Vec<GridPos> {
        select_by_score(sim, |_, candidate| -(candidate.distance as f64))
    }
}
