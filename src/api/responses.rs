//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{GameMode, SessionSnapshot, Team, TimerSnapshot};

/// Response for clock command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub clock: TimerSnapshot,
}

impl ClockResponse {
    pub fn new(message: String, clock: TimerSnapshot) -> Self {
        Self {
            status: if clock.running { "running" } else { "stopped" }.to_string(),
            message,
            timestamp: Utc::now(),
            clock,
        }
    }
}

/// Response for session command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionSnapshot,
}

impl SessionResponse {
    pub fn new(message: String, session: SessionSnapshot) -> Self {
        Self {
            message,
            timestamp: Utc::now(),
            session,
        }
    }
}

/// Full scoreboard status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub game_clock: TimerSnapshot,
    pub shot_clock: TimerSnapshot,
    pub session: SessionSnapshot,
    pub game_buzzers: u64,
    pub shot_buzzers: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body of `POST /clock/:role/reset`. Without `seconds` the clock returns to its
/// configured length.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetRequest {
    pub seconds: Option<f64>,
}

/// Body of the foul and timeout endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustRequest {
    pub team: Team,
    #[serde(default = "default_delta")]
    pub delta: i32,
}

fn default_delta() -> i32 {
    1
}

/// Body of `POST /session/mode`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeRequest {
    pub mode: GameMode,
}
