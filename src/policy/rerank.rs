//! Request and response types for an external goal re-ranker
//!
//! The engine never talks to the ranking service itself. It builds the
//! candidate list, something outside sends it wherever it likes, and the
//! returned index order (possibly empty) is applied with [`choose_ranked`].

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::config::ScanConfig;
use crate::core::types::GridPos;
use crate::policy::candidates_for;
use crate::simulation::{Robot, Simulation};
use crate::world::HazardFlags;

/// Environment summary sent alongside the candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankContext {
    pub size: f64,
    pub clutter: f64,
    pub heat: bool,
    pub gas: bool,
    pub noise: bool,
}

impl RerankContext {
    pub fn from_simulation(sim: &Simulation) -> Self {
        let flags = HazardFlags::from_hazards(sim.hazards());
        Self {
            size: sim.size() as f64,
            clutter: sim.clutter(),
            heat: flags.heat,
            gas: flags.gas,
            noise: flags.noise,
        }
    }
}

/// One goal option with its predicted cost in milliseconds of simulated time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankCandidate {
    pub index: usize,
    pub pred_ms: f64,
    pub goal: GridPos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankRequest {
    pub ctx: RerankContext,
    pub candidates: Vec<RerankCandidate>,
}

impl RerankRequest {
    pub fn new(sim: &Simulation, candidates: Vec<RerankCandidate>) -> Self {
        Self {
            ctx: RerankContext::from_simulation(sim),
            candidates,
        }
    }
}

/// Candidate goals for one robot, costed as travel plus scan time
///
/// Travel is one second per cell; scan time is `scan_hint(frontier)` when the
/// hint is usable, otherwise the configured default for the current clutter.
pub fn candidates_for_robot(
    sim: &Simulation,
    robot: &Robot,
    frontiers: &[GridPos],
    scan: &ScanConfig,
    scan_hint: impl Fn(GridPos) -> Option<f64>,
) -> Vec<RerankCandidate> {
    let clutter = sim.clutter();
    candidates_for(sim, robot, frontiers)
        .into_iter()
        .enumerate()
        .map(|(index, c)| {
            let cost = f64::from(c.distance) + scan.resolve(scan_hint(c.frontier), clutter);
            RerankCandidate {
                index,
                pred_ms: cost * 1000.0,
                goal: c.vantage,
            }
        })
        .collect()
}

/// Apply an external ranking to the candidates
///
/// The first ranked index naming a candidate wins. An empty or entirely
/// invalid ranking falls back to the lowest `pred_ms` (earliest on ties).
pub fn choose_ranked<'a>(
    candidates: &'a [RerankCandidate],
    ranking: &[usize],
) -> Option<&'a RerankCandidate> {
    ranking
        .iter()
        .find_map(|&idx| candidates.iter().find(|c| c.index == idx))
        .or_else(|| {
            if !ranking.is_empty() {
                tracing::debug!(?ranking, "ranking names no candidate, using lowest cost");
            }
            candidates.iter().min_by_key(|c| OrderedFloat(c.pred_ms))
        })
}
