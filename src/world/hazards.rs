//! Hazard regions stamped into the ground truth during generation

use serde::{Deserialize, Serialize};

use crate::core::config::{HazardConfig, HazardKind};
use crate::core::types::{CellState, GridPos};
use crate::simulation::rng::SharedRng;
use crate::spatial::Grid;

/// A square impassable patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hazard {
    pub kind: HazardKind,
    pub center: GridPos,
    pub radius: usize,
}

impl Hazard {
    pub fn contains(&self, pos: GridPos) -> bool {
        let r = self.radius as i64;
        (pos.x as i64 - self.center.x as i64).abs() <= r
            && (pos.y as i64 - self.center.y as i64).abs() <= r
    }
}

/// Which hazard kinds are present in a world
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardFlags {
    pub heat: bool,
    pub gas: bool,
    pub noise: bool,
}

impl HazardFlags {
    pub fn from_hazards(hazards: &[Hazard]) -> Self {
        let mut flags = Self::default();
        for hazard in hazards {
            match hazard.kind {
                HazardKind::Heat => flags.heat = true,
                HazardKind::Gas => flags.gas = true,
                HazardKind::Noise => flags.noise = true,
            }
        }
        flags
    }
}

/// Burn hazard patches into the ground truth
///
/// Centres are drawn from interior cells. Makes no draws when `count` is 0
/// or the grid has no interior.
pub fn stamp_hazards(
    truth: &mut Grid<CellState>,
    config: &HazardConfig,
    rng: &SharedRng,
) -> Vec<Hazard> {
    let n = truth.width();
    if config.count == 0 || n <= 2 {
        return Vec::new();
    }

    let interior = n - 2;
    let mut hazards = Vec::with_capacity(config.count);
    for i in 0..config.count {
        let kind = config
            .kinds
            .get(i % config.kinds.len().max(1))
            .copied()
            .unwrap_or(HazardKind::Heat);
        let center = GridPos::new(
            1 + rng.below(interior) as i32,
            1 + rng.below(interior) as i32,
        );
        for pos in truth.window(center, config.radius) {
            truth.set(pos, CellState::Obstacle);
        }
        hazards.push(Hazard {
            kind,
            center,
            radius: config.radius,
        });
    }
    hazards
}
