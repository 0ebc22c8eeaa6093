//! Information-gain policies
//!
//! All three score a frontier by the number of Unknown cells around it
//! (`info_radius` window) traded off against the path length to its vantage.
//! Each adds a small uniform jitter from the simulation's random stream so
//! exact ties do not always resolve the same way.

use crate::core::config::PolicyParams;
use crate::core::types::GridPos;
use crate::policy::{select_by_score, Candidate, GoalPolicy};
use crate::simulation::Simulation;

fn gain(sim: &Simulation, candidate: &Candidate) -> f64 {
    sim.info_gain(candidate.frontier, sim.config().info_radius) as f64
}

/// Maximise gain per cell traveled
///
/// A vantage the robot already stands on counts as one cell away.
#[derive(Debug, Clone)]
pub struct InfoGainRatio {
    pub jitter_scale: f64,
}

impl InfoGainRatio {
    pub fn new(params: &PolicyParams) -> Self {
        Self {
            jitter_scale: params.jitter_scale,
        }
    }
}

impl GoalPolicy for InfoGainRatio {
    fn name(&self) -> &str {
        "ratio"
    }

    fn select_goals(&self, sim: &Simulation) -> Vec<GridPos> {
        select_by_score(sim, |_, c| {
            gain(sim, c) / f64::from(c.distance.max(1)) + sim.rng().jitter(self.jitter_scale)
        })
    }
}

/// Maximise `gain - lambda * distance`
#[derive(Debug, Clone)]
pub struct InfoGainMinusLambdaDist {
    pub lambda: f64,
    pub jitter_scale: f64,
}

impl InfoGainMinusLambdaDist {
    pub fn new(params: &PolicyParams) -> Self {
        Self {
            lambda: params.lambda,
            jitter_scale: params.jitter_scale,
        }
    }
}

impl GoalPolicy for InfoGainMinusLambdaDist {
    fn name(&self) -> &str {
        "lambda"
    }

    fn select_goals(&self, sim: &Simulation) -> Vec<GridPos> {
        select_by_score(sim, |_, c| {
            gain(sim, c) - self.lambda * f64::from(c.distance)
                + sim.rng().jitter(self.jitter_scale)
        })
    }
}

/// Maximise `3 * gain - distance`, plus a bonus for frontiers close to the
/// robot so it keeps working the area it is already in
#[derive(Debug, Clone)]
pub struct HysteresisWeighted {
    pub bonus: f64,
    /// Manhattan radius (robot to frontier) within which the bonus applies
    pub radius: f64,
    pub jitter_scale: f64,
}

impl HysteresisWeighted {
    pub const GAIN_WEIGHT: f64 = 3.0;

    pub fn new(params: &PolicyParams) -> Self {
        Self {
            bonus: params.hysteresis_gain,
            radius: params.hysteresis_radius,
            jitter_scale: params.jitter_scale,
        }
    }
}

impl GoalPolicy for HysteresisWeighted {
    fn name(&self) -> &str {
        "hysteresis"
    }

    fn select_goals(&self, sim: &Simulation) -> Vec<GridPos> {
        select_by_score(sim, |robot, c| {
            let near = f64::from(robot.position.manhattan(&c.frontier)) <= self.radius;
            let bonus = if near { self.bonus } else { 0.0 };
            Self::GAIN_WEIGHT * gain(sim, c) - f64::from(c.distance)
                + bonus
                + sim.rng().jitter(self.jitter_scale)
        })
    }
}
