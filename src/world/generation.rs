//! Seeded ground-truth and initial knowledge generation

use crate::core::config::SimConfig;
use crate::core::types::{CellState, GridPos};
use crate::simulation::rng::SharedRng;
use crate::spatial::Grid;
use crate::world::hazards::{stamp_hazards, Hazard};

/// Output of world generation, consumed by simulation construction
#[derive(Debug, Clone)]
pub struct GeneratedWorld {
    pub truth: Grid<CellState>,
    pub knowledge: Grid<CellState>,
    /// Spawn-patch cells, row-major from the origin corner
    pub spawn: Vec<GridPos>,
    pub hazards: Vec<Hazard>,
}

/// Side of the square spawn patch for a grid of side `size`
pub fn spawn_patch_side(size: usize) -> usize {
    (size / 10).max(2).min(size)
}

/// Generate the ground truth and the initial knowledge map
///
/// Fully determined by `(size, obstacle_prob, seed, simple_room_mode, hazards)`
/// and the position of `rng` in its stream.
pub fn generate_world(config: &SimConfig, rng: &SharedRng) -> GeneratedWorld {
    let n = config.size;
    let mut truth = Grid::filled(n, n, CellState::Free);

    scatter_obstacles(&mut truth, config.obstacle_prob, rng);

    if config.simple_room_mode {
        carve_simple_room(&mut truth);
    } else {
        carve_open_layout(&mut truth);
    }

    // Hazards are final before anything else sees the grid
    let hazards = stamp_hazards(&mut truth, &config.hazards, rng);

    let mut knowledge = Grid::new(n, n);
    let side = spawn_patch_side(n) as i32;
    let mut spawn = Vec::with_capacity((side * side) as usize);
    for y in 0..side {
        for x in 0..side {
            let pos = GridPos::new(x, y);
            truth.set(pos, CellState::Free);
            knowledge.set(pos, CellState::Free);
            spawn.push(pos);
        }
    }

    tracing::debug!(
        size = n,
        seed = config.seed,
        simple_room = config.simple_room_mode,
        hazards = hazards.len(),
        obstacles = truth.count(CellState::is_obstacle),
        "generated world"
    );

    GeneratedWorld {
        truth,
        knowledge,
        spawn,
        hazards,
    }
}

fn is_perimeter(pos: GridPos, n: i32) -> bool {
    pos.x == 0 || pos.y == 0 || pos.x == n - 1 || pos.y == n - 1
}

/// One draw per interior cell, row-major; perimeter forced to obstacle
fn scatter_obstacles(truth: &mut Grid<CellState>, obstacle_prob: f64, rng: &SharedRng) {
    let n = truth.width() as i32;
    for y in 0..n {
        for x in 0..n {
            let pos = GridPos::new(x, y);
            let state = if is_perimeter(pos, n) || rng.next_f64() < obstacle_prob {
                CellState::Obstacle
            } else {
                CellState::Free
            };
            truth.set(pos, state);
        }
    }
}

/// Clear the interior, then split it with one wall column holding a
/// 3-cell doorway centred on the middle row
fn carve_simple_room(truth: &mut Grid<CellState>) {
    let n = truth.width() as i32;
    let mid = n / 2;

    for y in 1..n - 1 {
        for x in 1..n - 1 {
            truth.set(GridPos::new(x, y), CellState::Free);
        }
    }

    for y in 0..n {
        truth.set(GridPos::new(mid, y), CellState::Obstacle);
    }
    for y in (mid - 1)..=(mid + 1) {
        if y >= 1 && y <= n - 2 {
            truth.set(GridPos::new(mid, y), CellState::Free);
        }
    }
}

/// Door gaps in all four outer walls plus a full cross-shaped corridor
fn carve_open_layout(truth: &mut Grid<CellState>) {
    let n = truth.width() as i32;
    let mid = n / 2;

    for d in -1..=1 {
        truth.set(GridPos::new(mid + d, 0), CellState::Free);
        truth.set(GridPos::new(mid + d, n - 1), CellState::Free);
        truth.set(GridPos::new(0, mid + d), CellState::Free);
        truth.set(GridPos::new(n - 1, mid + d), CellState::Free);
    }

    for i in 0..n {
        truth.set(GridPos::new(i, mid), CellState::Free);
        truth.set(GridPos::new(mid, i), CellState::Free);
    }
}
