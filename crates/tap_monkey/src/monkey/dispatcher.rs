//! Shared dispatch state and the per-tick sample-and-deliver step.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use glam::Vec2;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::events::{EventSink, MonkeyEvent, Outbox};
use crate::exclusion::ExclusionSet;
use crate::geometry::ScreenBounds;
use crate::monkey::RunState;
use crate::sampling::{Candidate, RandomSource, RejectionSampler};
use crate::sync::lock;
use crate::target::TargetHandle;

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// A position was sampled and handed to the target.
    Dispatched {
        position: Vec2,
        /// False if the target was dropped between sampling and delivery.
        delivered: bool,
    },
    /// No live target; nothing was sampled.
    Idle,
    /// Sampling failed; the next tick retries.
    SamplingFailed,
    /// The run is not active. The loop must not reschedule.
    Halted,
}

impl TickOutcome {
    /// Returns true if the loop should schedule another tick.
    pub fn reschedules(&self) -> bool {
        !matches!(self, TickOutcome::Halted)
    }
}

/// Cancellation flag for one run, from resume until the next pause.
#[derive(Debug, Default)]
pub(crate) struct RunToken {
    cancelled: AtomicBool,
}

impl RunToken {
    pub(crate) fn cancelled() -> Self {
        Self {
            cancelled: AtomicBool::new(true),
        }
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[inline]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

pub(crate) struct Core {
    pub(crate) state: RunState,
    pub(crate) random: Box<dyn RandomSource>,
    pub(crate) exclusions: ExclusionSet,
    pub(crate) sampler: RejectionSampler,
    pub(crate) interval: Duration,
}

/// State shared between the control surface and whatever drives ticks.
pub(crate) struct Dispatcher {
    core: Mutex<Core>,
    events: Outbox,
    target: TargetHandle,
    screen: Arc<dyn ScreenBounds>,
}

impl Dispatcher {
    pub(crate) fn new(core: Core, screen: Arc<dyn ScreenBounds>) -> Self {
        Self {
            core: Mutex::new(core),
            events: Outbox::new(),
            target: TargetHandle::new(),
            screen,
        }
    }

    pub(crate) fn target(&self) -> &TargetHandle {
        &self.target
    }

    pub(crate) fn state(&self) -> RunState {
        lock(&self.core).state
    }

    pub(crate) fn interval(&self) -> Duration {
        lock(&self.core).interval
    }

    /// Runs `f` with exclusive access to the shared state.
    pub(crate) fn with_core<R>(&self, f: impl FnOnce(&mut Core) -> R) -> R {
        f(&mut lock(&self.core))
    }

    pub(crate) fn set_sink(&self, sink: Box<dyn EventSink>) {
        self.events.set_sink(sink);
    }

    /// Hands queued events to the sink. Call with no lock held.
    pub(crate) fn flush_events(&self) {
        self.events.flush();
    }

    /// Moves to `to`, returning the previous state.
    ///
    /// The change event is queued, not delivered; see [`Dispatcher::flush_events`].
    pub(crate) fn transition(&self, to: RunState) -> RunState {
        let mut core = lock(&self.core);
        let from = std::mem::replace(&mut core.state, to);
        if from != to {
            info!("Monkey {} -> {}.", from, to);
            self.events.push(MonkeyEvent::StateChanged { from, to });
        }
        from
    }

    /// Samples one position and delivers it if the run identified by `token` is active.
    pub(crate) fn tick(&self, token: &RunToken) -> TickOutcome {
        if token.is_cancelled() {
            return TickOutcome::Halted;
        }

        let sampled = self.sample(token);
        self.events.flush();
        let candidate = match sampled {
            Ok(candidate) => candidate,
            Err(outcome) => return outcome,
        };

        // Deliver without holding the state lock so targets may call back into the monkey.
        let delivered = self.target.dispatch(candidate.position);
        if delivered {
            debug!(
                "Tapped ({:.1}, {:.1}) after {} candidate(s).",
                candidate.position.x, candidate.position.y, candidate.attempts
            );
        } else {
            debug!("Target dropped before delivery; tap discarded.");
        }

        TickOutcome::Dispatched {
            position: candidate.position,
            delivered,
        }
    }

    /// Draws a candidate under the state lock, queueing the tick's event.
    fn sample(&self, token: &RunToken) -> Result<Candidate, TickOutcome> {
        let mut guard = lock(&self.core);
        let core = &mut *guard;
        if core.state != RunState::Running || token.is_cancelled() {
            return Err(TickOutcome::Halted);
        }

        if self.target.is_empty() {
            debug!("No live target; skipping tick.");
            self.events.push(MonkeyEvent::TargetMissing);
            return Err(TickOutcome::Idle);
        }

        let size = self.screen.query();
        let result = core.sampler.sample_until(
            size,
            &core.exclusions,
            core.random.as_mut(),
            || token.is_cancelled(),
        );

        match result {
            Ok(candidate) => {
                self.events.push(MonkeyEvent::TapGenerated {
                    position: candidate.position,
                    attempts: candidate.attempts,
                });
                Ok(candidate)
            }
            Err(Error::Cancelled) => Err(TickOutcome::Halted),
            Err(e) => {
                warn!("Skipping tap: {}.", e);
                self.events.push(MonkeyEvent::SamplingFailed {
                    reason: e.to_string(),
                });
                Err(TickOutcome::SamplingFailed)
            }
        }
    }
}
