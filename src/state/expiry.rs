//! Edge-triggered expiry signal between a clock and its buzzer

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::Notify;

/// Fire-and-forget notification raised when a running clock reaches zero.
///
/// Firing never blocks. At most one wake-up is held for a consumer that is not
/// currently waiting, so bursts of firings collapse into one.
#[derive(Debug, Clone, Default)]
pub struct ExpiryNotifier {
    signal: Arc<Notify>,
    fired: Arc<AtomicU64>,
}

impl ExpiryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the expiry signal
    pub fn fire(&self) {
        self.fired.fetch_add(1, Ordering::Relaxed);
        self.signal.notify_one();
    }

    /// Wait for the next expiry
    pub async fn expired(&self) {
        self.signal.notified().await;
    }

    /// Total number of expirations fired so far
    pub fn fired_count(&self) -> u64 {
        self.fired.load(Ordering::Relaxed)
    }
}
