//! Delivery targets for synthesized taps.
//!
//! A [`TargetHandle`] holds a weak reference to whatever currently receives
//! input. Ownership of the target stays with the application; once the target
//! is dropped, the handle reports itself empty and dispatches become no-ops.
use std::fmt;
use std::sync::{Arc, Mutex, Weak};
use std::time::Instant;

use crossbeam_channel::Sender;
use glam::Vec2;

use crate::sync::lock;

/// Phase of a synthesized touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchAction {
    /// Finger pressed.
    Down,
    /// Finger released.
    Up,
}

/// A single synthesized touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Press or release.
    pub action: TouchAction,
    /// Position in screen pixels.
    pub position: Vec2,
    /// Time the press of this tap started; shared by the press and release.
    pub down_time: Instant,
    /// Time this event was produced.
    pub event_time: Instant,
}

impl TouchEvent {
    pub fn new(action: TouchAction, position: Vec2, down_time: Instant, event_time: Instant) -> Self {
        Self {
            action,
            position,
            down_time,
            event_time,
        }
    }
}

/// Receiver of synthesized touch events, e.g. an application window.
pub trait TouchTarget: Send + Sync {
    fn dispatch_touch(&self, event: &TouchEvent);
}

impl<F> TouchTarget for F
where
    F: Fn(&TouchEvent) + Send + Sync,
{
    fn dispatch_touch(&self, event: &TouchEvent) {
        self(event)
    }
}

/// Target that forwards every event into a channel.
#[derive(Debug, Clone)]
pub struct ChannelTarget {
    tx: Sender<TouchEvent>,
}

impl ChannelTarget {
    pub fn new(tx: Sender<TouchEvent>) -> Self {
        Self { tx }
    }
}

impl TouchTarget for ChannelTarget {
    fn dispatch_touch(&self, event: &TouchEvent) {
        let _ = self.tx.send(*event);
    }
}

/// Shared, non-owning slot for the current [`TouchTarget`].
///
/// Clones refer to the same slot.
#[derive(Clone, Default)]
pub struct TargetHandle {
    slot: Arc<Mutex<Option<Weak<dyn TouchTarget>>>>,
}

impl TargetHandle {
    /// Creates an empty handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the handle at `target`, discarding the previous reference.
    pub fn set_target<T>(&self, target: &Arc<T>)
    where
        T: TouchTarget + 'static,
    {
        let weak = Arc::downgrade(target);
        let weak: Weak<dyn TouchTarget> = weak;
        *lock(&self.slot) = Some(weak);
    }

    /// Points the handle at an already type-erased target, or empties it on `None`.
    pub fn set_target_opt(&self, target: Option<&Arc<dyn TouchTarget>>) {
        *lock(&self.slot) = target.map(Arc::downgrade);
    }

    /// Empties the handle.
    pub fn clear(&self) {
        *lock(&self.slot) = None;
    }

    /// Returns true if there is no target or the target has been dropped.
    pub fn is_empty(&self) -> bool {
        lock(&self.slot)
            .as_ref()
            .map_or(true, |weak| weak.strong_count() == 0)
    }

    /// Returns a strong reference to the target if it is still alive.
    pub fn upgrade(&self) -> Option<Arc<dyn TouchTarget>> {
        lock(&self.slot).as_ref().and_then(Weak::upgrade)
    }

    /// Delivers a press followed by a release at `position`.
    ///
    /// Returns false, delivering nothing, if the target is absent or gone.
    pub fn dispatch(&self, position: Vec2) -> bool {
        // Upgrade first so the slot lock is not held while the target runs.
        let Some(target) = self.upgrade() else {
            return false;
        };

        let down_time = Instant::now();
        target.dispatch_touch(&TouchEvent::new(
            TouchAction::Down,
            position,
            down_time,
            down_time,
        ));
        target.dispatch_touch(&TouchEvent::new(
            TouchAction::Up,
            position,
            down_time,
            Instant::now(),
        ));
        true
    }
}

impl fmt::Debug for TargetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetHandle")
            .field("empty", &self.is_empty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<TouchEvent>>,
    }

    impl TouchTarget for Recorder {
        fn dispatch_touch(&self, event: &TouchEvent) {
            self.events.lock().unwrap().push(*event);
        }
    }

    #[test]
    fn new_handle_is_empty_and_dispatch_is_noop() {
        let handle = TargetHandle::new();
        assert!(handle.is_empty());
        assert!(!handle.dispatch(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn dispatch_delivers_press_then_release() {
        let handle = TargetHandle::new();
        let target = Arc::new(Recorder::default());
        handle.set_target(&target);

        assert!(!handle.is_empty());
        assert!(handle.dispatch(Vec2::new(10.5, 20.25)));

        let events = target.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action, TouchAction::Down);
        assert_eq!(events[1].action, TouchAction::Up);
        assert_eq!(events[0].position, Vec2::new(10.5, 20.25));
        assert_eq!(events[1].position, events[0].position);
        assert_eq!(events[0].down_time, events[1].down_time);
        assert!(events[1].event_time >= events[0].event_time);
    }

    #[test]
    fn dropped_target_makes_handle_empty() {
        let handle = TargetHandle::new();
        let target = Arc::new(Recorder::default());
        handle.set_target(&target);
        drop(target);

        assert!(handle.is_empty());
        assert!(handle.upgrade().is_none());
        assert!(!handle.dispatch(Vec2::ZERO));
    }

    #[test]
    fn clones_share_the_slot() {
        let handle = TargetHandle::new();
        let other = handle.clone();
        let target = Arc::new(Recorder::default());
        other.set_target(&target);
        assert!(!handle.is_empty());
        handle.clear();
        assert!(other.is_empty());
        // The handle never owned the target.
        assert_eq!(Arc::strong_count(&target), 1);
    }

    #[test]
    fn optional_target_sets_or_clears() {
        let handle = TargetHandle::new();
        let recorder = Arc::new(Recorder::default());
        let target: Arc<dyn TouchTarget> = recorder.clone();

        handle.set_target_opt(Some(&target));
        assert!(!handle.is_empty());
        assert!(handle.dispatch(Vec2::new(2.0, 3.0)));
        assert_eq!(recorder.events.lock().unwrap().len(), 2);

        handle.set_target_opt(None);
        assert!(handle.is_empty());
        assert!(!handle.dispatch(Vec2::ZERO));
        assert_eq!(recorder.events.lock().unwrap().len(), 2);
    }

    #[test]
    fn replacing_the_target_redirects_delivery() {
        let handle = TargetHandle::new();
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        handle.set_target(&first);
        handle.set_target(&second);
        handle.dispatch(Vec2::ONE);
        assert!(first.events.lock().unwrap().is_empty());
        assert_eq!(second.events.lock().unwrap().len(), 2);
    }

    #[test]
    fn closure_and_channel_targets_receive_events() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = TargetHandle::new();
        let target = Arc::new(ChannelTarget::new(tx));
        handle.set_target(&target);
        handle.dispatch(Vec2::new(3.0, 4.0));
        let received: Vec<_> = rx.try_iter().map(|e| e.action).collect();
        assert_eq!(received, vec![TouchAction::Down, TouchAction::Up]);

        let count = Arc::new(Mutex::new(0));
        let seen = count.clone();
        let closure = Arc::new(move |_: &TouchEvent| *seen.lock().unwrap() += 1);
        handle.set_target(&closure);
        handle.dispatch(Vec2::ZERO);
        assert_eq!(*count.lock().unwrap(), 2);
    }
}
