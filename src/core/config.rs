//! Scenario configuration with documented defaults
//!
//! Everything tunable about a run is collected here. Scenarios live as TOML
//! files under `data/scenarios/` and are loaded with [`load_scenario`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ExploreError, Result};

/// Largest grid side accepted at construction
///
/// Coordinates are stored as `i32`, and BFS buffers are `size²` entries,
/// so this keeps both comfortably in range.
pub const MAX_GRID_SIZE: usize = 4096;

/// Kind of hazard stamped into the ground truth during generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Heat,
    Gas,
    Noise,
}

/// Hazard regions burned into the world before anyone reads it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    /// Number of hazard patches (0 disables hazards and their RNG draws)
    pub count: usize,
    /// Half-width of each square patch
    pub radius: usize,
    /// Kinds assigned round-robin to the patches
    pub kinds: Vec<HazardKind>,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            count: 0,
            radius: 1,
            kinds: vec![HazardKind::Heat],
        }
    }
}

/// Construction parameters for a [`crate::Simulation`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Side length N of the square grid, in cells
    pub size: usize,

    /// Probability that an interior cell starts as an obstacle
    ///
    /// One draw is made per interior cell in every carving mode, so the RNG
    /// stream position after generation depends only on `size`.
    pub obstacle_prob: f64,

    /// Number of robots, all spawned inside the origin patch
    pub robot_count: usize,

    /// Robot speed in cells per simulated second
    pub robot_speed: f64,

    /// Half-width of the window used by information-gain scoring
    pub info_radius: usize,

    /// Coverage at which a scheduler should consider the run complete
    pub target_coverage: f64,

    /// Step budget for a scheduler
    pub max_steps: u64,

    pub seed: u64,

    /// Single room split by one wall with a doorway, instead of the open layout
    pub simple_room_mode: bool,

    pub hazards: HazardConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            size: 30,
            obstacle_prob: 0.1,
            robot_count: 1,
            robot_speed: 1.0,
            info_radius: 3,
            target_coverage: 0.95,
            max_steps: 2000,
            seed: 42,
            simple_room_mode: false,
            hazards: HazardConfig::default(),
        }
    }
}

impl SimConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject malformed construction input
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(invalid("size must be positive"));
        }
        if self.size > MAX_GRID_SIZE {
            return Err(invalid(format!(
                "size ({}) exceeds maximum of {}",
                self.size, MAX_GRID_SIZE
            )));
        }
        if !(0.0..=1.0).contains(&self.obstacle_prob) {
            return Err(invalid(format!(
                "obstacle_prob ({}) must be within [0, 1]",
                self.obstacle_prob
            )));
        }
        if self.robot_count == 0 {
            return Err(invalid("robot_count must be at least 1"));
        }
        if !self.robot_speed.is_finite() || self.robot_speed <= 0.0 {
            return Err(invalid(format!(
                "robot_speed ({}) must be positive",
                self.robot_speed
            )));
        }
        if !(0.0..=1.0).contains(&self.target_coverage) {
            return Err(invalid(format!(
                "target_coverage ({}) must be within [0, 1]",
                self.target_coverage
            )));
        }
        if self.max_steps == 0 {
            return Err(invalid("max_steps must be positive"));
        }
        Ok(())
    }
}

/// Tuning knobs for the built-in goal policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyParams {
    /// Distance weight for info-gain-minus-lambda-distance
    pub lambda: f64,

    /// Bonus added by the hysteresis policy to nearby frontiers
    pub hysteresis_gain: f64,

    /// Manhattan radius within which the hysteresis bonus applies
    pub hysteresis_radius: f64,

    /// Scale of the uniform tie-breaking jitter added to scores
    ///
    /// Small enough never to outweigh a whole cell of gain or distance.
    pub jitter_scale: f64,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            lambda: 1.0,
            hysteresis_gain: 2.0,
            hysteresis_radius: 3.0,
            jitter_scale: 1e-3,
        }
    }
}

impl PolicyParams {
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("lambda", self.lambda),
            ("hysteresis_gain", self.hysteresis_gain),
            ("hysteresis_radius", self.hysteresis_radius),
            ("jitter_scale", self.jitter_scale),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(invalid(format!("{} ({}) must be finite", name, value)));
            }
        }
        if self.jitter_scale < 0.0 {
            return Err(invalid("jitter_scale must not be negative"));
        }
        Ok(())
    }
}

/// How long a robot spends scanning at each decision
///
/// An externally predicted duration always wins. Without one, a fixed
/// override is used if configured, otherwise a clutter-derived default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub fixed_duration: Option<f64>,
    pub base_duration: f64,
    /// Extra seconds per unit of clutter (obstacle fraction)
    pub clutter_scale: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            fixed_duration: None,
            base_duration: 1.0,
            clutter_scale: 2.0,
        }
    }
}

impl ScanConfig {
    pub fn fixed(duration: f64) -> Self {
        Self {
            fixed_duration: Some(duration),
            ..Self::default()
        }
    }

    /// Duration used when no external estimate is available
    pub fn default_duration(&self, clutter: f64) -> f64 {
        match self.fixed_duration {
            Some(duration) => duration.max(0.0),
            None => (self.base_duration + self.clutter_scale * clutter).max(0.0),
        }
    }

    /// Pick the scan duration for one decision
    ///
    /// Hints that are negative or not finite are treated as absent.
    pub fn resolve(&self, hint: Option<f64>, clutter: f64) -> f64 {
        match hint {
            Some(h) if h.is_finite() && h >= 0.0 => h,
            _ => self.default_duration(clutter),
        }
    }
}

fn default_stall_ticks() -> u64 {
    50
}

/// A complete, loadable run description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Name of this scenario (set from filename when loaded by name)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub policy: PolicyParams,
    #[serde(default)]
    pub scan: ScanConfig,
    /// Ticks without any newly known cell before a run counts as stalled
    #[serde(default = "default_stall_ticks")]
    pub stall_ticks: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            sim: SimConfig::default(),
            policy: PolicyParams::default(),
            scan: ScanConfig::default(),
            stall_ticks: default_stall_ticks(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let scenario: ScenarioConfig = toml::from_str(contents)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut scenario = Self::from_toml_str(&contents)?;
        if scenario.name.is_empty() {
            scenario.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        self.sim.validate()?;
        self.policy.validate()?;
        if self.stall_ticks == 0 {
            return Err(invalid("stall_ticks must be positive"));
        }
        Ok(())
    }
}

/// Load a scenario from TOML
///
/// Loads from `data/scenarios/{name}.toml`
pub fn load_scenario(name: &str) -> Result<ScenarioConfig> {
    let mut scenario = ScenarioConfig::from_path(&scenario_path(name))?;
    scenario.name = name.to_string();
    Ok(scenario)
}

/// Get path to scenario file
fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from("data/scenarios").join(format!("{}.toml", name))
}

fn invalid(message: impl Into<String>) -> ExploreError {
    ExploreError::InvalidConfig(message.into())
}
