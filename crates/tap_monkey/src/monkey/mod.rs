//! Scheduling of random taps: lifecycle, per-tick dispatch, and the timer worker.
//!
//! [`Monkey`] is the public control surface. Each tick samples a position via
//! [`crate::sampling::RejectionSampler`] and hands it to the bound
//! [`crate::target::TargetHandle`].
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod config;
pub mod controller;
pub mod dispatcher;
mod worker;

pub use config::{Driver, MonkeyConfig, DEFAULT_INTERVAL};
pub use controller::Monkey;
pub use dispatcher::TickOutcome;

/// Lifecycle state of a [`Monkey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunState {
    /// Ticks are being dispatched.
    Running,
    /// Halted, keeping the bound target.
    Paused,
    /// Halted with the target cleared. Initial state.
    #[default]
    Stopped,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
