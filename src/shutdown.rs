//! Process-wide shutdown flag set by signal delivery.
//!
//! The sampling loop only checks the flag at tick and cycle boundaries.
//! Waits between ticks return early once shutdown is requested so the agent
//! stops promptly, but nothing interrupts a report that is being sent.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cloneable handle to the shutdown flag.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    requested: Arc<AtomicBool>,
    wake_tx: Sender<()>,
    wake_rx: Receiver<()>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (wake_tx, wake_rx) = bounded(1);
        Self {
            requested: Arc::new(AtomicBool::new(false)),
            wake_tx,
            wake_rx,
        }
    }

    /// Ask the agent to stop. Only the first call has an effect.
    pub fn request(&self) {
        if !self.requested.swap(true, Ordering::SeqCst) {
            tracing::info!("Shutdown requested");
            let _ = self.wake_tx.try_send(());
        }
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Sleep for up to `timeout`, returning early on shutdown.
    ///
    /// Returns `true` if shutdown has been requested.
    pub fn wait(&self, timeout: Duration) -> bool {
        if self.is_requested() {
            return true;
        }
        match self.wake_rx.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                self.is_requested()
            }
        }
    }

    /// Route interrupt and termination signals to this flag.
    ///
    /// Covers SIGINT, SIGTERM and SIGHUP on Unix, and Ctrl+C, Ctrl+Break
    /// and console close on Windows. Can only be installed once per process.
    pub fn install_handler(&self) -> Result<(), ctrlc::Error> {
        let signal = self.clone();
        ctrlc::set_handler(move || {
            signal.request();
        })
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_starts_running() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_requested());
        assert!(!signal.wait(Duration::from_millis(1)));
    }

    #[test]
    fn test_request_is_shared_between_clones() {
        let signal = ShutdownSignal::new();
        let handle = signal.clone();
        handle.request();
        handle.request();

        assert!(signal.is_requested());
        assert!(signal.wait(Duration::from_secs(5)));
        // Stays set after the wake token was consumed.
        assert!(signal.wait(Duration::from_secs(5)));
    }

    #[test]
    fn test_wait_returns_early_on_request() {
        let signal = ShutdownSignal::new();
        let handle = signal.clone();

        let started = Instant::now();
        let requester = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            handle.request();
        });

        assert!(signal.wait(Duration::from_secs(10)));
        assert!(started.elapsed() < Duration::from_secs(5));
        requester.join().unwrap();
    }
}
