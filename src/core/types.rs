//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Occupancy state of a single grid cell
///
/// Ground truth only ever holds `Free` or `Obstacle`. Knowledge maps start
/// out `Unknown` and are filled in by sensing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Unknown,
    Free,
    Obstacle,
}

impl CellState {
    /// Has this cell been observed?
    pub fn is_known(self) -> bool {
        self != CellState::Unknown
    }

    pub fn is_free(self) -> bool {
        self == CellState::Free
    }

    pub fn is_obstacle(self) -> bool {
        self == CellState::Obstacle
    }
}

/// Integer grid coordinate
///
/// Signed so neighbor arithmetic can step past an edge and be rejected by
/// the grid's bounds check instead of wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan (L1) distance
    pub fn manhattan(&self, other: &Self) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// 4-connected neighbors in fixed order: +x, -x, +y, -y
    ///
    /// The order matters: vantage selection breaks distance ties by it.
    pub fn neighbors(self) -> [GridPos; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Simulation step counter
pub type Step = u64;
