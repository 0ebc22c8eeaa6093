//! Frontier detection and ground-truth pathfinding

pub mod frontier;
pub mod pathfinding;

pub use frontier::{detect_frontiers, info_gain, is_frontier};
pub use pathfinding::{bfs_distance, nearest_unknown, vantage_for_frontier, DistanceField};
