//! Shared handle serializing commands and ticks for one clock

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{
    expiry::ExpiryNotifier,
    timer_state::{ClockProfile, ClockRole, CountdownTimer, Sample, TimerSnapshot},
};

/// One scoreboard clock shared between command handlers, its ticker and its
/// buzzer.
///
/// All mutation goes through a single mutex per clock. Snapshots are published on
/// a watch channel whenever they change, and expiry is signalled only after the
/// lock has been released.
#[derive(Debug, Clone)]
pub struct ClockHandle {
    role: ClockRole,
    refresh_interval: Duration,
    timer: Arc<Mutex<CountdownTimer>>,
    expiry: ExpiryNotifier,
    snapshot_tx: Arc<watch::Sender<TimerSnapshot>>,
}

impl ClockHandle {
    pub fn new(profile: ClockProfile) -> Self {
        let timer = CountdownTimer::new(profile);
        let (snapshot_tx, _) = watch::channel(timer.snapshot());

        Self {
            role: profile.role,
            refresh_interval: profile.refresh_interval(),
            timer: Arc::new(Mutex::new(timer)),
            expiry: ExpiryNotifier::new(),
            snapshot_tx: Arc::new(snapshot_tx),
        }
    }

    pub fn role(&self) -> ClockRole {
        self.role
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn expiry(&self) -> &ExpiryNotifier {
        &self.expiry
    }

    /// Receive every published snapshot change
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    fn lock(&self) -> Result<MutexGuard<'_, CountdownTimer>, String> {
        self.timer
            .lock()
            .map_err(|e| format!("Failed to lock {} clock: {}", self.role, e))
    }

    fn publish(&self, snapshot: &TimerSnapshot) {
        self.snapshot_tx.send_if_modified(|current| {
            if current == snapshot {
                false
            } else {
                *current = snapshot.clone();
                true
            }
        });
    }

    /// Start or resume the countdown
    pub fn start(&self) -> Result<TimerSnapshot, String> {
        let mut timer = self.lock()?;
        let started = timer.start(Instant::now());
        let snapshot = timer.snapshot();
        drop(timer);

        if started {
            info!("{} clock started at {}", self.role, snapshot.display);
        } else {
            debug!("{} clock start ignored (running={})", self.role, snapshot.running);
        }
        self.publish(&snapshot);
        Ok(snapshot)
    }

    /// Pause the countdown at the current instant
    pub fn stop(&self) -> Result<TimerSnapshot, String> {
        let mut timer = self.lock()?;
        let stopped = timer.stop(Instant::now());
        let snapshot = timer.snapshot();
        drop(timer);

        if stopped {
            info!("{} clock stopped at {}", self.role, snapshot.display);
        }
        self.publish(&snapshot);
        Ok(snapshot)
    }

    /// Stop and rewind to `to`, or to the configured length
    pub fn reset(&self, to: Option<Duration>) -> Result<TimerSnapshot, String> {
        let mut timer = self.lock()?;
        timer.reset(to);
        let snapshot = timer.snapshot();
        drop(timer);

        info!("{} clock reset to {}", self.role, snapshot.display);
        self.publish(&snapshot);
        Ok(snapshot)
    }

    /// Periodic sample. Fires the expiry notifier on the tick that reaches zero.
    pub fn tick(&self) -> Result<Sample, String> {
        let mut timer = self.lock()?;
        let sample = timer.sample(Instant::now());
        if sample == Sample::Idle {
            return Ok(sample);
        }
        let snapshot = timer.snapshot();
        drop(timer);

        if sample == Sample::Expired {
            info!("{} clock expired", self.role);
            self.expiry.fire();
        }
        self.publish(&snapshot);
        Ok(sample)
    }

    /// Current state without sampling
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        self.lock().map(|timer| timer.snapshot())
    }
}
