//! Background timer thread for [`crate::monkey::Driver::Threaded`].
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use tracing::debug;

use crate::error::Result;
use crate::monkey::dispatcher::{Dispatcher, RunToken};

/// Live timer thread for one run. Dropping it wakes the thread, which then exits.
pub(crate) struct Worker {
    _wake: Sender<()>,
}

impl Worker {
    /// Spawns a thread that ticks immediately and then once per interval until `token` is cancelled.
    pub(crate) fn spawn(dispatcher: Arc<Dispatcher>, token: Arc<RunToken>) -> Result<Self> {
        let (wake_tx, wake_rx) = crossbeam_channel::bounded::<()>(0);
        thread::Builder::new()
            .name("tap-monkey".into())
            .spawn(move || run(&dispatcher, &token, &wake_rx))?;
        Ok(Self { _wake: wake_tx })
    }
}

fn run(dispatcher: &Dispatcher, token: &RunToken, wake: &Receiver<()>) {
    debug!("Dispatch worker started.");
    loop {
        if !dispatcher.tick(token).reschedules() {
            break;
        }

        // Interval is re-read every tick so changes apply on the next reschedule.
        match wake.recv_timeout(dispatcher.interval()) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("Dispatch worker exited.");
}
