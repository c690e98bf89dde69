//! Event types and sinks for observing a running monkey.
//!
//! This module defines [`MonkeyEvent`] and a set of sinks to emit, collect, or
//! forward events produced by [`crate::monkey::Monkey`]. Sinks are invoked from
//! whichever thread drives the dispatch loop, so they must be [`Send`].
//!
//! Sinks run while the monkey holds none of its own locks and may call back
//! into it, except to replace the sink itself.
use std::collections::VecDeque;
use std::sync::Mutex;

use crossbeam_channel::Sender;
use glam::Vec2;

use crate::monkey::RunState;
use crate::sync::{lock, try_lock};

/// Describes events emitted by the dispatch loop and lifecycle transitions.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum MonkeyEvent {
    /// The run state changed.
    StateChanged {
        /// State before the transition.
        from: RunState,
        /// State after the transition.
        to: RunState,
    },

    /// A tap position was accepted and is about to be delivered.
    TapGenerated {
        /// Position in screen pixels.
        position: Vec2,
        /// Number of candidates drawn, including the accepted one.
        attempts: u32,
    },

    /// A tick found no live target and skipped sampling.
    TargetMissing,

    /// Sampling failed for this tick; the loop keeps running.
    SamplingFailed {
        /// Human-readable reason.
        reason: String,
    },
}

/// Discriminant of [`MonkeyEvent`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonkeyEventKind {
    StateChanged,
    TapGenerated,
    TargetMissing,
    SamplingFailed,
}

impl MonkeyEvent {
    pub fn kind(&self) -> MonkeyEventKind {
        match self {
            MonkeyEvent::StateChanged { .. } => MonkeyEventKind::StateChanged,
            MonkeyEvent::TapGenerated { .. } => MonkeyEventKind::TapGenerated,
            MonkeyEvent::TargetMissing => MonkeyEventKind::TargetMissing,
            MonkeyEvent::SamplingFailed { .. } => MonkeyEventKind::SamplingFailed,
        }
    }
}

/// A generic event sink that accepts [`MonkeyEvent`]s.
pub trait EventSink: Send {
    fn send(&mut self, event: MonkeyEvent);

    /// Returns false for kinds the sink ignores, letting emitters skip building them.
    fn wants(&self, _kind: MonkeyEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: MonkeyEvent) {}

    #[inline]
    fn wants(&self, _kind: MonkeyEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(MonkeyEvent) + Send,
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(MonkeyEvent) + Send,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(MonkeyEvent) + Send,
{
    #[inline]
    fn send(&mut self, event: MonkeyEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<MonkeyEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<MonkeyEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[MonkeyEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: MonkeyEvent) {
        self.events.push(event);
    }
}

/// Event sink that forwards events into a channel, optionally restricted to some kinds.
pub struct ChannelSink {
    tx: Sender<MonkeyEvent>,
    kinds: Option<Vec<MonkeyEventKind>>,
}

impl ChannelSink {
    pub fn new(tx: Sender<MonkeyEvent>) -> Self {
        Self { tx, kinds: None }
    }

    /// Only forward events of the given kinds.
    pub fn with_kinds(mut self, kinds: impl Into<Vec<MonkeyEventKind>>) -> Self {
        self.kinds = Some(kinds.into());
        self
    }
}

impl EventSink for ChannelSink {
    #[inline]
    fn send(&mut self, event: MonkeyEvent) {
        let _ = self.tx.send(event);
    }

    fn wants(&self, kind: MonkeyEventKind) -> bool {
        self.kinds.as_ref().map_or(true, |kinds| kinds.contains(&kind))
    }
}

/// Queue in front of the installed [`EventSink`].
///
/// Events are pushed wherever they occur and handed to the sink by `flush`,
/// which callers run once they hold no other lock. Events pushed while a flush
/// is in progress, including from inside the sink, are delivered by that flush.
pub(crate) struct Outbox {
    pending: Mutex<VecDeque<MonkeyEvent>>,
    sink: Mutex<Box<dyn EventSink>>,
}

impl Outbox {
    pub(crate) fn new() -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            sink: Mutex::new(Box::new(())),
        }
    }

    pub(crate) fn set_sink(&self, sink: Box<dyn EventSink>) {
        *lock(&self.sink) = sink;
    }

    pub(crate) fn push(&self, event: MonkeyEvent) {
        lock(&self.pending).push_back(event);
    }

    /// Delivers queued events in order. Returns at once if another flush holds the sink.
    pub(crate) fn flush(&self) {
        loop {
            {
                let Some(mut sink) = try_lock(&self.sink) else {
                    return;
                };
                loop {
                    let next = lock(&self.pending).pop_front();
                    let Some(event) = next else {
                        break;
                    };
                    if sink.wants(event.kind()) {
                        sink.send(event);
                    }
                }
            }

            // An event pushed after the drain but before the sink was released.
            if lock(&self.pending).is_empty() {
                return;
            }
        }
    }
}
