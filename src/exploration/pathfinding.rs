//! Breadth-first pathfinding over the ground truth
//!
//! Distances here are oracle distances: they use true traversability, so a
//! path may run through cells the robot has not observed yet. An unreachable
//! query is an ordinary outcome and returns None.

use std::collections::VecDeque;

use crate::core::types::{CellState, GridPos};
use crate::spatial::Grid;

const UNREACHED: u32 = u32::MAX;

/// Result of one breadth-first search
struct Search {
    dist: Vec<u32>,
    hit: Option<(GridPos, u32)>,
}

fn traversable_index(truth: &Grid<CellState>, pos: GridPos) -> Option<usize> {
    truth
        .index(pos)
        .filter(|&i| truth.as_slice()[i] == CellState::Free)
}

/// Expand from `start` over Free cells until `is_goal` accepts a cell
///
/// Goals are tested on discovery, so the hit distance is exact. Without a
/// hit the search covers the whole reachable component.
fn breadth_first(
    truth: &Grid<CellState>,
    start: GridPos,
    mut is_goal: impl FnMut(GridPos) -> bool,
) -> Search {
    let mut dist = vec![UNREACHED; truth.len()];
    let Some(start_idx) = traversable_index(truth, start) else {
        return Search { dist, hit: None };
    };

    dist[start_idx] = 0;
    if is_goal(start) {
        return Search {
            dist,
            hit: Some((start, 0)),
        };
    }

    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let d = truth.index(current).map_or(UNREACHED, |i| dist[i]);
        for next in truth.neighbors(current) {
            let Some(i) = traversable_index(truth, next) else {
                continue;
            };
            if dist[i] != UNREACHED {
                continue;
            }
            dist[i] = d + 1;
            if is_goal(next) {
                return Search {
                    dist,
                    hit: Some((next, d + 1)),
                };
            }
            queue.push_back(next);
        }
    }

    Search { dist, hit: None }
}

/// Exact 4-connected shortest path length between two Free cells
///
/// None if either endpoint is out of bounds or blocked, or no path exists.
pub fn bfs_distance(truth: &Grid<CellState>, start: GridPos, target: GridPos) -> Option<u32> {
    traversable_index(truth, target)?;
    breadth_first(truth, start, |pos| pos == target)
        .hit
        .map(|(_, d)| d)
}

/// Nearest Free cell (by path length) whose knowledge is still Unknown
pub fn nearest_unknown(
    truth: &Grid<CellState>,
    knowledge: &Grid<CellState>,
    start: GridPos,
) -> Option<GridPos> {
    breadth_first(truth, start, |pos| {
        knowledge.get(pos) == Some(CellState::Unknown)
    })
    .hit
    .map(|(pos, _)| pos)
}

/// Distances from one source to every reachable cell
///
/// Lets a policy score many frontiers with a single search. Values are
/// identical to [`bfs_distance`] from the same source.
#[derive(Debug, Clone)]
pub struct DistanceField {
    source: GridPos,
    width: usize,
    height: usize,
    dist: Vec<u32>,
}

impl DistanceField {
    pub fn compute(truth: &Grid<CellState>, source: GridPos) -> Self {
        Self {
            source,
            width: truth.width(),
            height: truth.height(),
            dist: breadth_first(truth, source, |_| false).dist,
        }
    }

    pub fn source(&self) -> GridPos {
        self.source
    }

    pub fn get(&self, pos: GridPos) -> Option<u32> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        let d = self.dist[y * self.width + x];
        (d != UNREACHED).then_some(d)
    }

    pub fn reachable_count(&self) -> usize {
        self.dist.iter().filter(|&&d| d != UNREACHED).count()
    }
}

/// Best walkable cell next to a frontier
///
/// Among the frontier's 4-neighbors known to be Free, the one with the
/// smallest distance according to `distance_to`; the earlier neighbor in
/// [`GridPos::neighbors`] order wins ties. Returns the cell and its distance.
pub fn vantage_for_frontier(
    knowledge: &Grid<CellState>,
    frontier: GridPos,
    mut distance_to: impl FnMut(GridPos) -> Option<u32>,
) -> Option<(GridPos, u32)> {
    let mut best: Option<(GridPos, u32)> = None;
    for neighbor in knowledge.neighbors(frontier) {
        if knowledge.get(neighbor) != Some(CellState::Free) {
            continue;
        }
        let Some(d) = distance_to(neighbor) else {
            continue;
        };
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((neighbor, d));
        }
    }
    best
}
