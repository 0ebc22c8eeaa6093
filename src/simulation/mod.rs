//! Simulation state, stepping driver, and metrics
//!
//! A [`Simulation`] owns the ground truth, the robots' shared knowledge map,
//! and the random stream. It advances only when the driver is called; there
//! are no timers and nothing runs in the background.

pub mod driver;
pub mod metrics;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use driver::{StepOutcome, ARRIVAL_SCAN_RADIUS, STUCK_SCAN_RADIUS, TRANSIT_SCAN_RADIUS};
pub use metrics::MetricsSnapshot;
pub use rng::SharedRng;
pub use snapshot::WorldSnapshot;
pub use state::{Robot, Simulation};
