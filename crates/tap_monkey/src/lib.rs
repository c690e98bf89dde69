#![forbid(unsafe_code)]
//! tap_monkey: Deterministic random-tap generation for stress-testing interactive applications.
//!
//! Modules:
//! - geometry: integer rectangles, live regions, and screen size providers
//! - exclusion: regions that generated taps must avoid
//! - sampling: seedable random sources and the rejection sampler
//! - target: weak delivery targets and synthesized touch events
//! - monkey: run/pause/stop lifecycle, tick dispatch, and the timer worker
//! - events: observable lifecycle and dispatch events
pub mod error;
pub mod events;
pub mod exclusion;
pub mod geometry;
pub mod monkey;
pub mod sampling;
pub mod target;

mod sync;

/// Convenient re-exports for common types. Import with `use tap_monkey::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::events::{
        ChannelSink, EventSink, FnSink, MonkeyEvent, MonkeyEventKind, VecSink,
    };
    pub use crate::exclusion::ExclusionSet;
    pub use crate::geometry::{FixedScreen, Rect, ScreenBounds, SharedScreen, VisibleRegion};
    pub use crate::monkey::{
        Driver, Monkey, MonkeyConfig, RunState, TickOutcome, DEFAULT_INTERVAL,
    };
    pub use crate::sampling::{
        unit_float, Candidate, RandomSource, RejectionSampler, SeededRandom, SequenceRandom,
    };
    pub use crate::target::{ChannelTarget, TargetHandle, TouchAction, TouchEvent, TouchTarget};
}
