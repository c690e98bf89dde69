//! Configuration for a [`crate::monkey::Monkey`].
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Delay between taps when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// How ticks are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Driver {
    /// A background thread ticks once per interval while running.
    #[default]
    Threaded,
    /// The caller ticks explicitly with [`crate::monkey::Monkey::step`].
    Manual,
}

/// Configuration for a monkey run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonkeyConfig {
    /// Delay between consecutive taps.
    pub interval: Duration,
    /// Seed for a reproducible tap sequence; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Rejected candidates allowed per tap before the tick gives up.
    pub max_attempts: Option<u32>,
    /// Tick driver.
    pub driver: Driver,
}

impl Default for MonkeyConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            seed: None,
            max_attempts: None,
            driver: Driver::Threaded,
        }
    }
}

impl MonkeyConfig {
    /// Creates a new [`MonkeyConfig`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the interval between taps.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the interval between taps in milliseconds.
    pub fn with_interval_ms(self, millis: u64) -> Self {
        self.with_interval(Duration::from_millis(millis))
    }

    /// Sets the seed for the tap sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bounds the rejection loop.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Sets the tick driver.
    pub fn with_driver(mut self, driver: Driver) -> Self {
        self.driver = driver;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(Error::InvalidConfig("interval must be > 0".into()));
        }
        if self.max_attempts == Some(0) {
            return Err(Error::InvalidConfig("max_attempts must be > 0".into()));
        }

        Ok(())
    }
}

/// Converts a signed millisecond count into a positive interval.
pub(crate) fn interval_from_millis(millis: i64) -> Result<Duration> {
    match u64::try_from(millis) {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(Error::InvalidConfig(format!(
            "interval must be > 0 ms (got {millis})"
        ))),
    }
}
