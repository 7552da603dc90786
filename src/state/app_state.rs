//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::Config;
use super::{
    ClockHandle, ClockProfile, ClockRole, GameMode, GameSession, SessionSnapshot, Team,
    TimerSnapshot,
};

/// Main application state: both scoreboard clocks and the game session
#[derive(Debug)]
pub struct AppState {
    pub game_clock: ClockHandle,
    pub shot_clock: ClockHandle,
    pub session: Arc<Mutex<GameSession>>,
    /// Length the shot clock returns to on a full reset
    pub shot_clock_default: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(port: u16, host: String, mode: GameMode, game: ClockProfile, shot: ClockProfile) -> Self {
        Self {
            game_clock: ClockHandle::new(game),
            shot_clock: ClockHandle::new(shot),
            session: Arc::new(Mutex::new(GameSession::new(mode))),
            shot_clock_default: shot.default_duration,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.port,
            config.host.clone(),
            config.mode,
            config.game_profile(),
            config.shot_profile(),
        )
    }

    pub fn clock(&self, role: ClockRole) -> &ClockHandle {
        match role {
            ClockRole::Game => &self.game_clock,
            ClockRole::Shot => &self.shot_clock,
        }
    }

    fn record_action(&self, action: String) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action);
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    pub fn start_clock(&self, role: ClockRole) -> Result<TimerSnapshot, String> {
        self.record_action(format!("{}-start", role));
        self.clock(role).start()
    }

    pub fn stop_clock(&self, role: ClockRole) -> Result<TimerSnapshot, String> {
        self.record_action(format!("{}-stop", role));
        self.clock(role).stop()
    }

    pub fn reset_clock(&self, role: ClockRole, to: Option<Duration>) -> Result<TimerSnapshot, String> {
        self.record_action(format!("{}-reset", role));
        self.clock(role).reset(to)
    }

    /// Apply a change to the session under its lock and return the result
    pub fn update_session<F, R>(&self, action: &str, updater: F) -> Result<R, String>
    where
        F: FnOnce(&mut GameSession) -> R,
    {
        let mut session = self.session.lock()
            .map_err(|e| format!("Failed to lock game session: {}", e))?;
        let result = updater(&mut session);
        drop(session);

        self.record_action(action.to_string());
        Ok(result)
    }

    pub fn get_session(&self) -> Result<SessionSnapshot, String> {
        self.session.lock()
            .map(|session| session.snapshot())
            .map_err(|e| format!("Failed to lock game session: {}", e))
    }

    pub fn advance_quarter(&self) -> Result<SessionSnapshot, String> {
        let snapshot = self.update_session("next-quarter", |session| {
            session.advance_quarter();
            session.snapshot()
        })?;
        info!("Advanced to quarter {}", snapshot.quarter + 1);
        Ok(snapshot)
    }

    pub fn regress_quarter(&self) -> Result<SessionSnapshot, String> {
        let snapshot = self.update_session("previous-quarter", |session| {
            session.regress_quarter();
            session.snapshot()
        })?;
        info!("Returned to quarter {}", snapshot.quarter + 1);
        Ok(snapshot)
    }

    pub fn adjust_foul(&self, team: Team, delta: i32) -> Result<SessionSnapshot, String> {
        let snapshot = self.update_session("foul", |session| {
            session.adjust_foul(team, delta);
            session.snapshot()
        })?;
        info!("Foul adjusted for {:?} by {}", team, delta);
        Ok(snapshot)
    }

    pub fn adjust_timeout(&self, team: Team, delta: i32) -> Result<SessionSnapshot, String> {
        let snapshot = self.update_session("timeout", |session| {
            session.adjust_timeout(team, delta);
            session.snapshot()
        })?;
        info!("Timeout adjusted for {:?} by {}", team, delta);
        Ok(snapshot)
    }

    /// Enter an overtime period and rewind the game clock to the overtime length.
    ///
    /// Like `change_mode` and `reset_all`, the clock is reset while the session
    /// lock is still held. Locks are always taken session first, then clock.
    pub fn apply_overtime(&self) -> Result<SessionSnapshot, String> {
        let (length, snapshot) = self.update_session("overtime", |session| {
            let length = session.apply_overtime();
            self.game_clock.reset(Some(length))?;
            Ok::<_, String>((length, session.snapshot()))
        })??;
        info!("Overtime period {} started ({}s)", snapshot.quarter + 1, length.as_secs());
        Ok(snapshot)
    }

    /// Switch presets and set the game clock to the new quarter length
    pub fn change_mode(&self, mode: GameMode) -> Result<SessionSnapshot, String> {
        let snapshot = self.update_session("mode", |session| {
            let length = session.change_mode(mode);
            self.game_clock.reset(Some(length))?;
            Ok::<_, String>(session.snapshot())
        })??;
        info!("Game mode changed to {:?}", mode);
        Ok(snapshot)
    }

    /// Clear the session and return both clocks to their defaults
    pub fn reset_all(&self) -> Result<SessionSnapshot, String> {
        let snapshot = self.update_session("reset-all", |session| {
            let length = session.reset_all();
            self.game_clock.reset(Some(length))?;
            self.shot_clock.reset(Some(self.shot_clock_default))?;
            Ok::<_, String>(session.snapshot())
        })??;
        info!("Game reset");
        Ok(snapshot)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
