//! Outer run loop: ask a policy for goals, drive every robot, decide when
//! to stop
//!
//! The engine itself has no notion of a run ending. Stopping on coverage,
//! step budget, or lack of progress is decided here.

pub mod comparison;
pub mod episode;

pub use comparison::{compare_policies, ComparisonReport};
pub use episode::{Episode, EpisodeReport, StopReason};
