//! Owned, serializable view of a simulation for visualization tooling
//!
//! Renderers get a copy; there is no path from a snapshot back into the
//! simulation.

use serde::{Deserialize, Serialize};

use crate::core::types::{CellState, GridPos};
use crate::simulation::metrics::MetricsSnapshot;
use crate::simulation::state::{Robot, Simulation};
use crate::world::Hazard;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub size: usize,
    /// Row-major ground truth
    pub truth: Vec<CellState>,
    /// Row-major knowledge map
    pub knowledge: Vec<CellState>,
    pub robots: Vec<Robot>,
    pub frontiers: Vec<GridPos>,
    pub hazards: Vec<Hazard>,
    pub metrics: MetricsSnapshot,
}

impl Simulation {
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            size: self.size(),
            truth: self.truth.as_slice().to_vec(),
            knowledge: self.knowledge.as_slice().to_vec(),
            robots: self.robots.clone(),
            frontiers: self.frontiers(),
            hazards: self.hazards.clone(),
            metrics: self.metrics(),
        }
    }
}
