//! State management module
//!
//! This module contains the countdown timers, their shared handles and the game
//! session bookkeeping.

pub mod app_state;
pub mod clock_handle;
pub mod expiry;
pub mod session_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use clock_handle::ClockHandle;
pub use expiry::ExpiryNotifier;
pub use session_state::{GameMode, GameSession, QuarterCounters, SessionSnapshot, Team};
pub use timer_state::{
    ClockProfile, ClockRole, CountdownTimer, Granularity, Sample, ShotPreset, TimerSnapshot,
};
