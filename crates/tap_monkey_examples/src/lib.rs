#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use tap_monkey::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .ok();
}

/// Target that logs every completed tap and counts them.
#[derive(Debug, Default)]
pub struct LoggingTarget {
    name: String,
    taps: AtomicUsize,
}

impl LoggingTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            taps: AtomicUsize::new(0),
        }
    }

    pub fn taps(&self) -> usize {
        self.taps.load(Ordering::Relaxed)
    }
}

impl TouchTarget for LoggingTarget {
    fn dispatch_touch(&self, event: &TouchEvent) {
        if event.action == TouchAction::Up {
            let n = self.taps.fetch_add(1, Ordering::Relaxed) + 1;
            info!(
                "[{}] tap #{} at ({:.0}, {:.0})",
                self.name, n, event.position.x, event.position.y
            );
        }
    }
}

/// Logs every event at info level.
pub fn logging_sink() -> impl EventSink {
    FnSink::new(|event| info!("event: {:?}", event))
}
