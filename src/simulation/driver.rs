//! One-cell-per-call stepping and sensing
//!
//! Each call moves at most one robot by at most one cell. Unreachable goals
//! and blocked moves are ordinary outcomes, never errors; callers notice a
//! lack of progress from unchanged coverage or step counts.

use serde::{Deserialize, Serialize};

use crate::core::types::{CellState, GridPos};
use crate::simulation::state::Simulation;

/// Reveal radius for a scan at rest (at the goal, or after a completed move)
pub const ARRIVAL_SCAN_RADIUS: usize = 3;

/// Reveal radius while passing through a cell
pub const TRANSIT_SCAN_RADIUS: usize = 2;

/// Reveal radius when both move attempts were blocked
///
/// Kept distinct from the arrival radius.
pub const STUCK_SCAN_RADIUS: usize = 2;

/// Floor applied to robot speed when converting a move into time
pub const MIN_ROBOT_SPEED: f64 = 1e-6;

/// What a single [`Simulation::move_and_scan`] call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// Robot index out of range; nothing changed
    NoSuchRobot,
    /// No ground-truth path to the goal; nothing changed
    Unreachable,
    /// Already at the goal; scanned in place
    ScannedAtGoal,
    /// Both preferred moves blocked; scanned in place
    Stuck,
    /// Moved one cell and scanned
    Moved { to: GridPos },
}

impl StepOutcome {
    /// Did the call advance the step counter?
    pub fn advanced(&self) -> bool {
        !matches!(self, StepOutcome::NoSuchRobot | StepOutcome::Unreachable)
    }
}

impl Simulation {
    /// Advance one robot by at most one cell toward `goal`, then scan
    ///
    /// Negative or NaN scan durations count as zero.
    pub fn move_and_scan(
        &mut self,
        robot_index: usize,
        goal: GridPos,
        scan_duration: f64,
    ) -> StepOutcome {
        let Some(start) = self.robots.get(robot_index).map(|r| r.position) else {
            tracing::warn!(robot_index, "move_and_scan for unknown robot");
            return StepOutcome::NoSuchRobot;
        };
        let scan = scan_duration.max(0.0);

        let Some(distance) = self.bfs_distance(start, goal) else {
            tracing::debug!(robot_index, %start, %goal, "goal unreachable, no step taken");
            return StepOutcome::Unreachable;
        };

        if distance == 0 {
            self.elapsed += scan;
            self.reveal(start, ARRIVAL_SCAN_RADIUS);
            self.steps += 1;
            return StepOutcome::ScannedAtGoal;
        }

        let Some(next) = self.greedy_step(start, goal) else {
            tracing::debug!(robot_index, %start, %goal, "both moves blocked, scanning in place");
            self.elapsed += scan;
            self.reveal(start, STUCK_SCAN_RADIUS);
            self.steps += 1;
            return StepOutcome::Stuck;
        };

        let next = self.truth.clamp(next);
        let robot = &mut self.robots[robot_index];
        robot.position = next;
        robot.distance += 1;

        self.elapsed += 1.0 / self.config.robot_speed.max(MIN_ROBOT_SPEED);
        self.reveal(next, TRANSIT_SCAN_RADIUS);
        self.elapsed += scan;
        self.reveal(next, ARRIVAL_SCAN_RADIUS);
        self.steps += 1;

        tracing::trace!(
            robot_index,
            from = %start,
            to = %next,
            remaining = distance - 1,
            "robot moved"
        );
        StepOutcome::Moved { to: next }
    }

    /// Copy ground truth into knowledge over the clipped square window
    ///
    /// Truth never holds Unknown, so a revealed cell can never revert.
    pub fn reveal(&mut self, center: GridPos, radius: usize) {
        for pos in self.truth.window(center, radius) {
            if let (Some(truth), Some(known)) = (self.truth.get(pos), self.knowledge.get_mut(pos)) {
                *known = truth;
            }
        }
    }

    /// First open cell among the axis-aligned moves toward `goal`
    ///
    /// The axis with the larger remaining offset is tried first (x on ties).
    /// Axes with no offset are not tried.
    fn greedy_step(&self, from: GridPos, goal: GridPos) -> Option<GridPos> {
        let dx = goal.x - from.x;
        let dy = goal.y - from.y;
        let along_x = (dx != 0).then(|| from.offset(dx.signum(), 0));
        let along_y = (dy != 0).then(|| from.offset(0, dy.signum()));

        let attempts = if dx.abs() >= dy.abs() {
            [along_x, along_y]
        } else {
            [along_y, along_x]
        };

        attempts
            .into_iter()
            .flatten()
            .find(|&pos| self.truth.get(pos) == Some(CellState::Free))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimConfig;
    use crate::spatial::Grid;

    fn open_sim(size: usize, robot: GridPos) -> Simulation {
        let config = SimConfig {
            size,
            ..SimConfig::default()
        };
        let truth = Grid::filled(size, size, CellState::Free);
        Simulation::from_grids(config, truth, Grid::new(size, size), &[robot]).unwrap()
    }

    #[test]
    fn test_scan_at_goal() {
        let mut sim = open_sim(12, GridPos::new(6, 6));
        let outcome = sim.move_and_scan(0, GridPos::new(6, 6), 1.5);

        assert_eq!(outcome, StepOutcome::ScannedAtGoal);
        assert_eq!(sim.steps(), 1);
        assert_eq!(sim.elapsed(), 1.5);
        assert_eq!(sim.robots()[0].distance, 0);
        // Radius-3 window: 7x7
        assert_eq!(sim.knowledge().count(CellState::is_known), 49);
    }

    #[test]
    fn test_move_one_cell() {
        let mut sim = open_sim(12, GridPos::new(2, 2));
        let outcome = sim.move_and_scan(0, GridPos::new(8, 4), 0.5);

        assert_eq!(outcome, StepOutcome::Moved { to: GridPos::new(3, 2) });
        assert_eq!(sim.robots()[0].position, GridPos::new(3, 2));
        assert_eq!(sim.robots()[0].distance, 1);
        assert_eq!(sim.steps(), 1);
        // 1 / speed + scan
        assert!((sim.elapsed() - 1.5).abs() < 1e-12);
        // Radius-3 window around (3,2), clipped at the top edge: 7x6
        assert_eq!(sim.knowledge().count(CellState::is_known), 42);
        assert_eq!(sim.knowledge().get(GridPos::new(6, 2)), Some(CellState::Free));
        assert_eq!(sim.knowledge().get(GridPos::new(3, 5)), Some(CellState::Free));
        assert_eq!(sim.knowledge().get(GridPos::new(7, 2)), Some(CellState::Unknown));
        assert_eq!(sim.knowledge().get(GridPos::new(2, 6)), Some(CellState::Unknown));
    }

    #[test]
    fn test_move_reveals_arrival_window_in_open_space() {
        let mut sim = open_sim(15, GridPos::new(6, 7));
        let outcome = sim.move_and_scan(0, GridPos::new(12, 7), 0.0);

        assert_eq!(outcome, StepOutcome::Moved { to: GridPos::new(7, 7) });
        // Full 7x7 window around the new cell, nothing around the old one
        assert_eq!(sim.knowledge().count(CellState::is_known), 49);
        assert_eq!(sim.knowledge().get(GridPos::new(10, 7)), Some(CellState::Free));
        assert_eq!(sim.knowledge().get(GridPos::new(3, 7)), Some(CellState::Unknown));
    }

    #[test]
    fn test_larger_offset_axis_first() {
        let mut sim = open_sim(12, GridPos::new(2, 2));
        sim.move_and_scan(0, GridPos::new(3, 9), 0.0);
        assert_eq!(sim.robots()[0].position, GridPos::new(2, 3));
    }

    #[test]
    fn test_falls_back_to_other_axis() {
        let mut sim = open_sim(12, GridPos::new(2, 2));
        sim.truth.set(GridPos::new(3, 2), CellState::Obstacle);
        sim.move_and_scan(0, GridPos::new(8, 4), 0.0);
        assert_eq!(sim.robots()[0].position, GridPos::new(2, 3));
    }

    #[test]
    fn test_stuck_scans_in_place() {
        let mut sim = open_sim(12, GridPos::new(2, 2));
        sim.truth.set(GridPos::new(3, 2), CellState::Obstacle);
        sim.truth.set(GridPos::new(2, 3), CellState::Obstacle);

        let outcome = sim.move_and_scan(0, GridPos::new(5, 5), 0.75);

        assert_eq!(outcome, StepOutcome::Stuck);
        assert_eq!(sim.robots()[0].position, GridPos::new(2, 2));
        assert_eq!(sim.robots()[0].distance, 0);
        assert_eq!(sim.elapsed(), 0.75);
        assert_eq!(sim.steps(), 1);
        // Radius-2 window: 5x5
        assert_eq!(sim.knowledge().count(CellState::is_known), 25);
    }

    #[test]
    fn test_unreachable_is_noop() {
        let mut sim = open_sim(8, GridPos::new(1, 1));
        for y in 0..8 {
            sim.truth.set(GridPos::new(4, y), CellState::Obstacle);
        }

        let outcome = sim.move_and_scan(0, GridPos::new(6, 6), 2.0);

        assert_eq!(outcome, StepOutcome::Unreachable);
        assert!(!outcome.advanced());
        assert_eq!(sim.steps(), 0);
        assert_eq!(sim.elapsed(), 0.0);
        assert_eq!(sim.knowledge().count(CellState::is_known), 0);
    }

    #[test]
    fn test_unknown_robot_is_noop() {
        let mut sim = open_sim(8, GridPos::new(1, 1));
        assert_eq!(
            sim.move_and_scan(3, GridPos::new(1, 1), 1.0),
            StepOutcome::NoSuchRobot
        );
        assert_eq!(sim.steps(), 0);
    }

    #[test]
    fn test_negative_scan_duration_counts_as_zero() {
        let mut sim = open_sim(8, GridPos::new(1, 1));
        sim.move_and_scan(0, GridPos::new(1, 1), -4.0);
        assert_eq!(sim.elapsed(), 0.0);
        assert_eq!(sim.steps(), 1);
    }

    #[test]
    fn test_speed_scales_travel_time() {
        let config = SimConfig {
            size: 8,
            robot_speed: 4.0,
            ..SimConfig::default()
        };
        let truth = Grid::filled(8, 8, CellState::Free);
        let mut sim =
            Simulation::from_grids(config, truth, Grid::new(8, 8), &[GridPos::new(1, 1)]).unwrap();
        sim.move_and_scan(0, GridPos::new(5, 1), 0.0);
        assert!((sim.elapsed() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_reveal_copies_truth() {
        let mut sim = open_sim(6, GridPos::new(0, 0));
        sim.truth.set(GridPos::new(1, 1), CellState::Obstacle);
        sim.reveal(GridPos::new(0, 0), 1);
        assert_eq!(sim.knowledge().get(GridPos::new(1, 1)), Some(CellState::Obstacle));
        assert_eq!(sim.knowledge().get(GridPos::new(0, 1)), Some(CellState::Free));
        assert_eq!(sim.knowledge().get(GridPos::new(2, 2)), Some(CellState::Unknown));
    }
}
