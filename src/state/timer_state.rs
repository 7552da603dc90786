//! Countdown timer state and drift-free sampling

use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};

/// Which clock on the scoreboard a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockRole {
    Game,
    Shot,
}

impl ClockRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockRole::Game => "game",
            ClockRole::Shot => "shot",
        }
    }
}

impl std::fmt::Display for ClockRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Smallest unit a clock displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// `mm:ss`
    Seconds,
    /// `ss.s`
    Tenths,
}

/// Quick-reset lengths for the shot clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotPreset {
    Full,
    Short,
}

impl ShotPreset {
    pub fn duration(&self) -> Duration {
        match self {
            ShotPreset::Full => Duration::from_secs(24),
            ShotPreset::Short => Duration::from_secs(14),
        }
    }
}

/// Per-clock configuration. Both scoreboard clocks share one timer design and
/// differ only in this profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockProfile {
    pub role: ClockRole,
    pub default_duration: Duration,
    pub refresh_hz: u32,
    pub granularity: Granularity,
}

impl ClockProfile {
    /// Main game clock: whole-second display, ~20 Hz sampling by default
    pub fn game(quarter: Duration, refresh_hz: u32) -> Self {
        Self {
            role: ClockRole::Game,
            default_duration: quarter,
            refresh_hz: refresh_hz.max(1),
            granularity: Granularity::Seconds,
        }
    }

    /// Shot clock: tenths display, ~50 Hz sampling by default
    pub fn shot(duration: Duration, refresh_hz: u32) -> Self {
        Self {
            role: ClockRole::Shot,
            default_duration: duration,
            refresh_hz: refresh_hz.max(1),
            granularity: Granularity::Tenths,
        }
    }

    /// Interval between two periodic samples
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(1) / self.refresh_hz.max(1)
    }
}

/// Outcome of a single periodic sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// The timer was not running; nothing changed
    Idle,
    /// Still counting down
    Running,
    /// This sample took remaining time to zero. Returned once per run.
    Expired,
}

/// Wall-clock anchored countdown.
///
/// Remaining time is always `baseline - (now - anchor)` rather than an accumulation
/// of per-tick decrements, so jitter in the sampling cadence never adds drift.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    profile: ClockProfile,
    configured: Duration,
    remaining: Duration,
    /// Set by `start`; `Some` exactly while running
    anchor: Option<Instant>,
    baseline: Duration,
}

impl CountdownTimer {
    /// Create a stopped timer at the profile's default duration
    pub fn new(profile: ClockProfile) -> Self {
        Self {
            profile,
            configured: profile.default_duration,
            remaining: profile.default_duration,
            anchor: None,
            baseline: profile.default_duration,
        }
    }

    pub fn profile(&self) -> &ClockProfile {
        &self.profile
    }

    pub fn role(&self) -> ClockRole {
        self.profile.role
    }

    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn configured(&self) -> Duration {
        self.configured
    }

    /// Start counting down from the current remaining time.
    ///
    /// Returns `false` without touching the anchor when already running or when
    /// there is no time left.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() || self.remaining.is_zero() {
            return false;
        }
        self.anchor = Some(now);
        self.baseline = self.remaining;
        true
    }

    /// Freeze remaining time at the exact stop instant.
    ///
    /// Never reports expiry, even if the freeze lands on zero.
    pub fn stop(&mut self, now: Instant) -> bool {
        if !self.is_running() {
            return false;
        }
        self.remaining = self.remaining_at(now);
        self.anchor = None;
        true
    }

    /// Stop and rewind. With a duration, that duration also becomes the
    /// configured length future resets return to.
    pub fn reset(&mut self, to: Option<Duration>) {
        self.anchor = None;
        if let Some(duration) = to {
            self.configured = duration;
        }
        self.remaining = self.configured;
        self.baseline = self.configured;
    }

    /// Recompute remaining time from the anchor. Self-terminates on reaching zero.
    pub fn sample(&mut self, now: Instant) -> Sample {
        if !self.is_running() {
            return Sample::Idle;
        }
        self.remaining = self.remaining_at(now);
        if self.remaining.is_zero() {
            self.anchor = None;
            Sample::Expired
        } else {
            Sample::Running
        }
    }

    // min() keeps remaining non-increasing if `now` arrives out of order.
    fn remaining_at(&self, now: Instant) -> Duration {
        match self.anchor {
            Some(anchor) => self
                .baseline
                .saturating_sub(now.saturating_duration_since(anchor))
                .min(self.remaining),
            None => self.remaining,
        }
    }

    /// Remaining time as `mm:ss`, rounded up to the next whole second
    pub fn format_minutes(&self) -> String {
        format_minutes(self.remaining)
    }

    /// Remaining time as `ss.s`, rounded up to the next tenth
    pub fn format_tenths(&self) -> String {
        format_tenths(self.remaining)
    }

    /// Remaining time in this clock's display granularity
    pub fn display(&self) -> String {
        match self.profile.granularity {
            Granularity::Seconds => self.format_minutes(),
            Granularity::Tenths => self.format_tenths(),
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            role: self.profile.role,
            remaining_seconds: self.remaining.as_secs_f64(),
            configured_seconds: self.configured.as_secs_f64(),
            running: self.is_running(),
            display: self.display(),
        }
    }
}

const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_TENTH: u128 = 100_000_000;

pub fn format_minutes(remaining: Duration) -> String {
    let seconds = remaining.as_nanos().div_ceil(NANOS_PER_SECOND);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn format_tenths(remaining: Duration) -> String {
    let tenths = remaining.as_nanos().div_ceil(NANOS_PER_TENTH);
    format!("{:02}.{}", tenths / 10, tenths % 10)
}

/// Point-in-time view of a timer for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub role: ClockRole,
    pub remaining_seconds: f64,
    pub configured_seconds: f64,
    pub running: bool,
    pub display: String,
}
