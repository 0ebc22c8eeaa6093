//! Goal-selection policies
//!
//! Architecture: Trait + tag dispatch
//! - `GoalPolicy` is the single capability: pick one goal per robot
//! - `PolicyKind` names the built-in strategies and builds them from
//!   `PolicyParams`, so schedulers can swap policies by name
//! - Externally composed strategies (`external`) plug into the same trait

pub mod external;
pub mod info_gain;
pub mod nearest;
pub mod rerank;

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::config::PolicyParams;
use crate::core::error::ExploreError;
use crate::core::types::GridPos;
use crate::exploration::vantage_for_frontier;
use crate::simulation::{Robot, Simulation};

pub use external::{FixedGoals, ScanCostPolicy};
pub use info_gain::{HysteresisWeighted, InfoGainMinusLambdaDist, InfoGainRatio};
pub use nearest::NearestFrontier;
pub use rerank::{choose_ranked, RerankCandidate, RerankContext};

/// Trait for goal-selection strategies
pub trait GoalPolicy {
    /// Short name used in reports and on the command line
    fn name(&self) -> &str;

    /// One goal per robot, in robot order
    ///
    /// May advance the simulation's random stream (score jitter) but never
    /// changes grids or robots.
    fn select_goals(&self, sim: &Simulation) -> Vec<GridPos>;
}

/// A frontier paired with the cell a robot would walk to in order to see it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub frontier: GridPos,
    pub vantage: GridPos,
    /// Path length from the robot to the vantage
    pub distance: u32,
}

/// Every frontier with a reachable vantage, in frontier order
///
/// Runs one BFS from the robot and reuses it for every frontier.
pub fn candidates_for(sim: &Simulation, robot: &Robot, frontiers: &[GridPos]) -> Vec<Candidate> {
    let field = sim.distance_field(robot.position);
    frontiers
        .iter()
        .filter_map(|&frontier| {
            vantage_for_frontier(sim.knowledge(), frontier, |n| field.get(n)).map(
                |(vantage, distance)| Candidate {
                    frontier,
                    vantage,
                    distance,
                },
            )
        })
        .collect()
}

/// Goal used when no frontier offers a reachable vantage
///
/// The nearest reachable unobserved cell, or the robot's own cell when
/// nothing is left to reach.
pub fn fallback_goal(sim: &Simulation, robot: &Robot) -> GridPos {
    match sim.nearest_unknown(robot.position) {
        Some(goal) => goal,
        None => {
            tracing::debug!(position = %robot.position, "nothing reachable left to explore");
            robot.position
        }
    }
}

/// Pick the highest-scoring candidate per robot, falling back when none exist
///
/// Scores are computed once per candidate, in order, before comparison, so
/// any jitter draws happen in a fixed sequence. Exact ties go to the earlier
/// candidate.
pub(crate) fn select_by_score(
    sim: &Simulation,
    mut score: impl FnMut(&Robot, &Candidate) -> f64,
) -> Vec<GridPos> {
    let frontiers = sim.frontiers();
    sim.robots()
        .iter()
        .map(|robot| {
            let candidates = candidates_for(sim, robot, &frontiers);
            let scored: Vec<OrderedFloat<f64>> = candidates
                .iter()
                .map(|c| OrderedFloat(score(robot, c)))
                .collect();
            scored
                .iter()
                .enumerate()
                .max_by_key(|&(i, s)| (*s, Reverse(i)))
                .map(|(i, _)| candidates[i].vantage)
                .unwrap_or_else(|| fallback_goal(sim, robot))
        })
        .collect()
}

/// Built-in policies, dispatched by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    NearestFrontier,
    InfoGainRatio,
    InfoGainMinusLambdaDist,
    HysteresisWeighted,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::NearestFrontier,
        PolicyKind::InfoGainRatio,
        PolicyKind::InfoGainMinusLambdaDist,
        PolicyKind::HysteresisWeighted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::NearestFrontier => "nearest",
            PolicyKind::InfoGainRatio => "ratio",
            PolicyKind::InfoGainMinusLambdaDist => "lambda",
            PolicyKind::HysteresisWeighted => "hysteresis",
        }
    }

    pub fn build(&self, params: &PolicyParams) -> Box<dyn GoalPolicy> {
        match self {
            PolicyKind::NearestFrontier => Box::new(NearestFrontier),
            PolicyKind::InfoGainRatio => Box::new(InfoGainRatio::new(params)),
            PolicyKind::InfoGainMinusLambdaDist => {
                Box::new(InfoGainMinusLambdaDist::new(params))
            }
            PolicyKind::HysteresisWeighted => Box::new(HysteresisWeighted::new(params)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "nearest_frontier" => Ok(PolicyKind::NearestFrontier),
            "ratio" | "info_gain_ratio" => Ok(PolicyKind::InfoGainRatio),
            "lambda" | "info_gain_minus_lambda_dist" => Ok(PolicyKind::InfoGainMinusLambdaDist),
            "hysteresis" | "hysteresis_weighted" => Ok(PolicyKind::HysteresisWeighted),
            other => Err(ExploreError::UnknownPolicy(other.to_string())),
        }
    }
}
