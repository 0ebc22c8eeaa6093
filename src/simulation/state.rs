//! Simulation state and read-only queries

use serde::{Deserialize, Serialize};

use crate::core::config::SimConfig;
use crate::core::error::{ExploreError, Result};
use crate::core::types::{CellState, GridPos, Step};
use crate::exploration::{self, DistanceField};
use crate::simulation::rng::SharedRng;
use crate::spatial::Grid;
use crate::world::{generate_world, Hazard};

/// A single exploring robot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    pub position: GridPos,
    /// Cells traveled so far
    pub distance: u64,
}

impl Robot {
    pub fn new(position: GridPos) -> Self {
        Self {
            position,
            distance: 0,
        }
    }
}

/// Ground truth, shared knowledge, robots, clock, and random stream
///
/// `Clone` deep-copies the grids and robots but the clone keeps drawing from
/// the same [`SharedRng`] stream, so paired runs stay comparable.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(super) config: SimConfig,
    pub(super) truth: Grid<CellState>,
    pub(super) knowledge: Grid<CellState>,
    pub(super) robots: Vec<Robot>,
    pub(super) hazards: Vec<Hazard>,
    pub(super) elapsed: f64,
    pub(super) steps: Step,
    pub(super) rng: SharedRng,
}

impl Simulation {
    /// Generate a world from `config`
    ///
    /// Robot `i` starts on spawn-patch cell `i mod patch_len`, row-major from
    /// the origin corner.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;

        let rng = SharedRng::seeded(config.seed);
        let world = generate_world(&config, &rng);

        let robots = (0..config.robot_count)
            .map(|i| Robot::new(world.spawn[i % world.spawn.len()]))
            .collect();

        Ok(Self {
            config,
            truth: world.truth,
            knowledge: world.knowledge,
            robots,
            hazards: world.hazards,
            elapsed: 0.0,
            steps: 0,
            rng,
        })
    }

    /// Build a simulation around hand-made grids
    ///
    /// Used for fixed scenarios and by tooling that imports a map. The grids
    /// must be `size × size`, the truth must hold no Unknown cells, every
    /// known cell must agree with the truth, and every robot must start on a
    /// Free truth cell. `robot_count` is taken from `positions`.
    pub fn from_grids(
        mut config: SimConfig,
        truth: Grid<CellState>,
        knowledge: Grid<CellState>,
        positions: &[GridPos],
    ) -> Result<Self> {
        config.robot_count = positions.len();
        config.validate()?;

        let n = config.size;
        for (name, grid) in [("truth", &truth), ("knowledge", &knowledge)] {
            if grid.width() != n || grid.height() != n {
                return Err(ExploreError::InvalidConfig(format!(
                    "{} grid is {}x{}, expected {}x{}",
                    name,
                    grid.width(),
                    grid.height(),
                    n,
                    n
                )));
            }
        }
        if truth.count(|c| c == CellState::Unknown) > 0 {
            return Err(ExploreError::InvalidConfig(
                "ground truth must not contain Unknown cells".into(),
            ));
        }
        if let Some((pos, known)) = knowledge
            .iter()
            .find(|&(pos, known)| known.is_known() && truth.get(pos) != Some(known))
        {
            return Err(ExploreError::InvalidConfig(format!(
                "knowledge marks {} as {:?} but the ground truth disagrees",
                pos, known
            )));
        }
        if let Some(bad) = positions
            .iter()
            .find(|&&p| truth.get(p) != Some(CellState::Free))
        {
            return Err(ExploreError::InvalidConfig(format!(
                "robot start {} is not a free cell",
                bad
            )));
        }

        Ok(Self {
            rng: SharedRng::seeded(config.seed),
            config,
            truth,
            knowledge,
            robots: positions.iter().map(|&p| Robot::new(p)).collect(),
            hazards: Vec::new(),
            elapsed: 0.0,
            steps: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    pub fn truth(&self) -> &Grid<CellState> {
        &self.truth
    }

    pub fn knowledge(&self) -> &Grid<CellState> {
        &self.knowledge
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn robot(&self, index: usize) -> Option<&Robot> {
        self.robots.get(index)
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    /// Simulated seconds since construction
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn steps(&self) -> Step {
        self.steps
    }

    /// The random stream; shared with any clones of this simulation
    pub fn rng(&self) -> &SharedRng {
        &self.rng
    }

    /// Current frontier cells, row-major
    pub fn frontiers(&self) -> Vec<GridPos> {
        exploration::detect_frontiers(&self.knowledge)
    }

    /// Oracle shortest-path length over the ground truth
    pub fn bfs_distance(&self, from: GridPos, to: GridPos) -> Option<u32> {
        exploration::bfs_distance(&self.truth, from, to)
    }

    /// Closest known-Free neighbor of `frontier` as seen from `robot`
    pub fn vantage_for_frontier(&self, robot: GridPos, frontier: GridPos) -> Option<GridPos> {
        exploration::vantage_for_frontier(&self.knowledge, frontier, |n| {
            self.bfs_distance(robot, n)
        })
        .map(|(pos, _)| pos)
    }

    /// Nearest reachable Free cell not yet observed, from `from`
    pub fn nearest_unknown(&self, from: GridPos) -> Option<GridPos> {
        exploration::nearest_unknown(&self.truth, &self.knowledge, from)
    }

    pub fn distance_field(&self, source: GridPos) -> DistanceField {
        DistanceField::compute(&self.truth, source)
    }

    pub fn info_gain(&self, center: GridPos, radius: usize) -> usize {
        exploration::info_gain(&self.knowledge, center, radius)
    }
}
