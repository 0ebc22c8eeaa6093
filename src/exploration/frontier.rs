//! Frontier detection over the knowledge map
//!
//! A frontier is an Unknown cell with at least one 4-neighbor known to be
//! Free. Frontiers are recomputed from scratch on every call; there is no
//! incremental index to keep in sync.

use crate::core::types::{CellState, GridPos};
use crate::spatial::Grid;

pub fn is_frontier(knowledge: &Grid<CellState>, pos: GridPos) -> bool {
    knowledge.get(pos) == Some(CellState::Unknown)
        && knowledge
            .neighbors(pos)
            .any(|n| knowledge.get(n) == Some(CellState::Free))
}

/// All frontier cells, in row-major scan order
pub fn detect_frontiers(knowledge: &Grid<CellState>) -> Vec<GridPos> {
    knowledge
        .iter()
        .filter(|&(pos, state)| state == CellState::Unknown && is_frontier(knowledge, pos))
        .map(|(pos, _)| pos)
        .collect()
}

/// Unknown cells in the clipped square window of half-width `radius`
pub fn info_gain(knowledge: &Grid<CellState>, center: GridPos, radius: usize) -> usize {
    knowledge
        .window(center, radius)
        .filter(|&pos| knowledge.get(pos) == Some(CellState::Unknown))
        .count()
}
