//! Public control surface: configuration setters and the run/pause/stop lifecycle.
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::info;

use crate::error::{Error, Result};
use crate::events::EventSink;
use crate::exclusion::ExclusionSet;
use crate::geometry::{Rect, ScreenBounds, VisibleRegion};
use crate::monkey::config::{interval_from_millis, Driver, MonkeyConfig};
use crate::monkey::dispatcher::{Core, Dispatcher, RunToken, TickOutcome};
use crate::monkey::worker::Worker;
use crate::monkey::RunState;
use crate::sampling::{RandomSource, RejectionSampler, SeededRandom};
use crate::sync::lock;
use crate::target::TargetHandle;

struct Control {
    token: Arc<RunToken>,
    worker: Option<Worker>,
}

/// Generates random taps on a [`TargetHandle`] at a fixed interval.
///
/// All methods take `&self`; share a monkey between threads with an [`Arc`].
/// `start`, `pause`, `resume` and `stop` are serialized against each other, so
/// concurrent calls always leave exactly one state and at most one live timer.
pub struct Monkey {
    dispatcher: Arc<Dispatcher>,
    control: Mutex<Control>,
    driver: Driver,
}

impl Monkey {
    /// Creates a stopped monkey with the default configuration.
    pub fn new(screen: impl ScreenBounds + 'static) -> Self {
        Self::build(MonkeyConfig::default(), Arc::new(screen))
    }

    /// Creates a stopped monkey, validating `config` first.
    pub fn try_new(config: MonkeyConfig, screen: impl ScreenBounds + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, Arc::new(screen)))
    }

    /// Like [`Monkey::try_new`] for a screen that is already shared.
    pub fn with_shared_screen(config: MonkeyConfig, screen: Arc<dyn ScreenBounds>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, screen))
    }

    fn build(config: MonkeyConfig, screen: Arc<dyn ScreenBounds>) -> Self {
        let random = match config.seed {
            Some(seed) => SeededRandom::new(seed),
            None => SeededRandom::from_entropy(),
        };
        let core = Core {
            state: RunState::Stopped,
            random: Box::new(random),
            exclusions: ExclusionSet::new(),
            sampler: RejectionSampler::new().with_max_attempts(config.max_attempts),
            interval: config.interval,
        };

        Self {
            dispatcher: Arc::new(Dispatcher::new(core, screen)),
            control: Mutex::new(Control {
                token: Arc::new(RunToken::cancelled()),
                worker: None,
            }),
            driver: config.driver,
        }
    }

    /// Returns the handle used to bind or unbind the delivery target.
    ///
    /// The returned handle shares its slot with the monkey.
    pub fn get_target(&self) -> TargetHandle {
        self.dispatcher.target().clone()
    }

    /// Resets the random sequence from `seed`. Call before the first tap for a reproducible run.
    pub fn set_sequence(&self, seed: u64) -> &Self {
        self.dispatcher.with_core(|core| core.random.set_seed(seed));
        self
    }

    /// Replaces the random source, e.g. with a [`crate::sampling::SequenceRandom`].
    pub fn set_random_source(&self, random: impl RandomSource + 'static) -> &Self {
        self.dispatcher
            .with_core(|core| core.random = Box::new(random));
        self
    }

    /// Sets the delay between taps. Takes effect on the next reschedule.
    ///
    /// Non-positive values are rejected and leave the current interval unchanged.
    pub fn set_interval(&self, millis: i64) -> Result<&Self> {
        let interval = interval_from_millis(millis)?;
        self.dispatcher.with_core(|core| core.interval = interval);
        Ok(self)
    }

    /// Bounds the rejection loop; `None` retries until a position is found.
    pub fn set_max_attempts(&self, max_attempts: Option<u32>) -> Result<&Self> {
        if max_attempts == Some(0) {
            return Err(Error::InvalidConfig("max_attempts must be > 0".into()));
        }
        self.dispatcher.with_core(|core| {
            core.sampler = core.sampler.with_max_attempts(max_attempts);
        });
        Ok(self)
    }

    /// Excludes `rect` from receiving taps.
    pub fn exclude(&self, rect: Rect) -> Result<&Self> {
        rect.validate()?;
        self.dispatcher.with_core(|core| {
            core.exclusions.add(rect);
        });
        Ok(self)
    }

    /// Excludes the current bounds of `region`. Invisible regions are ignored.
    pub fn exclude_region(&self, region: &impl VisibleRegion) -> Result<&Self> {
        match region.visible_bounds() {
            Some(rect) => self.exclude(rect),
            None => Ok(self),
        }
    }

    /// Removes every excluded region.
    pub fn clear_exclusions(&self) -> &Self {
        self.dispatcher.with_core(|core| core.exclusions.clear());
        self
    }

    /// Snapshot of the excluded regions.
    pub fn exclusions(&self) -> ExclusionSet {
        self.dispatcher.with_core(|core| core.exclusions.clone())
    }

    /// Installs the sink receiving [`crate::events::MonkeyEvent`]s, replacing the previous one.
    ///
    /// Sinks may call any other method of the monkey, but must not call this one.
    pub fn set_event_sink(&self, sink: impl EventSink + 'static) -> &Self {
        self.dispatcher.set_sink(Box::new(sink));
        self
    }

    pub fn state(&self) -> RunState {
        self.dispatcher.state()
    }

    pub fn interval(&self) -> Duration {
        self.dispatcher.interval()
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    /// Starts tapping. No-op unless stopped.
    pub fn start(&self) -> Result<()> {
        let result = {
            let mut control = lock(&self.control);
            if self.dispatcher.state() != RunState::Stopped {
                return Ok(());
            }
            info!("Starting monkey.");
            self.dispatcher.transition(RunState::Paused);
            self.resume_locked(&mut control)
        };
        self.dispatcher.flush_events();
        result
    }

    /// Halts tapping, keeping the target. Idempotent; no-op when stopped.
    pub fn pause(&self) {
        self.pause_locked(&mut lock(&self.control));
        self.dispatcher.flush_events();
    }

    /// Continues a paused run with an immediate tap. No-op unless paused.
    pub fn resume(&self) -> Result<()> {
        let result = self.resume_locked(&mut lock(&self.control));
        self.dispatcher.flush_events();
        result
    }

    /// Halts tapping and clears the target. Excluded regions are kept. Idempotent.
    pub fn stop(&self) {
        {
            let mut control = lock(&self.control);
            self.pause_locked(&mut control);
            self.dispatcher.transition(RunState::Stopped);
            self.dispatcher.target().clear();
        }
        self.dispatcher.flush_events();
    }

    /// Runs one tick on the calling thread.
    ///
    /// This is how [`Driver::Manual`] monkeys advance; with [`Driver::Threaded`]
    /// it adds a tap on top of the timer's.
    pub fn step(&self) -> TickOutcome {
        let token = lock(&self.control).token.clone();
        self.dispatcher.tick(&token)
    }

    fn pause_locked(&self, control: &mut Control) {
        // Cancel before taking the state lock so a spinning sampler lets go of it.
        control.token.cancel();
        control.worker = None;

        if self.dispatcher.state() != RunState::Stopped {
            self.dispatcher.transition(RunState::Paused);
        }
    }

    fn resume_locked(&self, control: &mut Control) -> Result<()> {
        if self.dispatcher.state() != RunState::Paused {
            return Ok(());
        }

        let token = Arc::new(RunToken::default());
        control.token = token.clone();
        self.dispatcher.transition(RunState::Running);

        if self.driver == Driver::Threaded {
            match Worker::spawn(self.dispatcher.clone(), token) {
                Ok(worker) => control.worker = Some(worker),
                Err(e) => {
                    control.token.cancel();
                    self.dispatcher.transition(RunState::Paused);
                    return Err(e);
                }
            }
        }

        Ok(())
    }
}

impl Drop for Monkey {
    fn drop(&mut self) {
        let control = self
            .control
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        control.token.cancel();
        control.worker = None;
    }
}
