//! Frontier Explore - Deterministic grid-based frontier exploration engine

pub mod core;
pub mod exploration;
pub mod policy;
pub mod scheduler;
pub mod simulation;
pub mod spatial;
pub mod world;

pub use crate::core::config::{PolicyParams, ScanConfig, ScenarioConfig, SimConfig};
pub use crate::core::error::{ExploreError, Result};
pub use crate::core::types::{CellState, GridPos};
pub use crate::policy::{GoalPolicy, PolicyKind};
pub use crate::simulation::{Robot, Simulation, StepOutcome};
