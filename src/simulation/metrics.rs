//! Exploration metrics, recomputed on demand

use serde::{Deserialize, Serialize};

use crate::core::types::{CellState, Step};
use crate::simulation::state::Simulation;

/// Point-in-time summary of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub coverage: f64,
    pub clutter: f64,
    pub total_distance: f64,
    pub elapsed: f64,
    pub steps: Step,
    pub frontier_count: usize,
}

impl Simulation {
    /// Cells whose knowledge is no longer Unknown
    pub fn known_cells(&self) -> usize {
        self.knowledge.count(CellState::is_known)
    }

    /// Fraction of cells observed, in [0, 1]
    pub fn coverage(&self) -> f64 {
        ratio(self.known_cells(), self.knowledge.len())
    }

    /// Fraction of ground-truth cells that are obstacles
    pub fn clutter(&self) -> f64 {
        ratio(self.truth.count(CellState::is_obstacle), self.truth.len())
    }

    /// Sum of cells traveled by every robot
    pub fn total_distance(&self) -> f64 {
        self.robots.iter().map(|r| r.distance as f64).sum()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            coverage: self.coverage(),
            clutter: self.clutter(),
            total_distance: self.total_distance(),
            elapsed: self.elapsed,
            steps: self.steps,
            frontier_count: self.frontiers().len(),
        }
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}
