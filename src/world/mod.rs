//! Ground-truth world generation

pub mod generation;
pub mod hazards;

pub use generation::{generate_world, spawn_patch_side, GeneratedWorld};
pub use hazards::{Hazard, HazardFlags};
