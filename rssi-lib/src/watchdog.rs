use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

/// Default time allowed between opening the port and the first decoded
/// record.
pub const NO_DATA_TIMEOUT: Duration = Duration::from_secs(3);

/// One-shot supervisor for the gap between transport-open and the
/// first decoded record.
///
/// If the timer fires while still armed, exactly one "no data" signal
/// is delivered on the receiver returned by [`arm`](Self::arm); the
/// upstream uses it to tell a silent-but-connected device apart from a
/// streaming one. Disarming and firing race over one atomic flag, and
/// whichever swaps it first wins, so a record arriving at the exact
/// timeout instant still counts as data received.
#[derive(Debug, Default)]
pub struct NoDataWatchdog {
    armed: Arc<AtomicBool>,
    timer: Option<JoinHandle<()>>,
}

impl NoDataWatchdog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the one-shot timer. Any previous arm cycle is cancelled.
    pub fn arm(&mut self, timeout: Duration) -> oneshot::Receiver<()> {
        self.disarm();
        let armed = Arc::new(AtomicBool::new(true));
        self.armed = Arc::clone(&armed);
        let (signal, receiver) = oneshot::channel();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if armed.swap(false, Ordering::AcqRel) {
                debug!("no telemetry decoded within {timeout:?}");
                // The receiver may already be gone; nothing to do then.
                let _ = signal.send(());
            }
        }));
        receiver
    }

    /// Mark data as received (or the cycle as over) and discard the
    /// timer. Idempotent; no signal fires after this returns.
    pub fn disarm(&mut self) {
        self.armed.swap(false, Ordering::AcqRel);
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }
}

impl Drop for NoDataWatchdog {
    fn drop(&mut self) {
        self.disarm();
    }
}
