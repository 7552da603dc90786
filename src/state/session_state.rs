//! Game session bookkeeping: quarter, fouls, timeouts and mode

use std::time::Duration;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const MAX_FOULS: u8 = 5;
pub const MAX_TIMEOUTS: u8 = 6;

/// Preset bundling regulation and overtime period lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Mini,
    Junior,
    #[default]
    Pro,
}

impl GameMode {
    /// Length of a regulation quarter
    pub fn regulation(&self) -> Duration {
        match self {
            GameMode::Mini => Duration::from_secs(360),
            GameMode::Junior => Duration::from_secs(480),
            GameMode::Pro => Duration::from_secs(600),
        }
    }

    /// Length of an overtime period
    pub fn overtime(&self) -> Duration {
        match self {
            GameMode::Mini => Duration::from_secs(180),
            GameMode::Junior => Duration::from_secs(240),
            GameMode::Pro => Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    fn index(&self) -> usize {
        match self {
            Team::Home => 0,
            Team::Away => 1,
        }
    }
}

/// Per-quarter, per-team counters that grow on demand.
///
/// Growth only happens through `ensure_through` (called by `adjust`); reads never
/// extend the sequence and treat unvisited quarters as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterCounters {
    max: u8,
    entries: Vec<[u8; 2]>,
}

impl QuarterCounters {
    pub fn new(max: u8) -> Self {
        Self {
            max,
            entries: vec![[0; 2]],
        }
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    /// Number of quarters with an entry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append zeroed entries until `quarter` is covered. Existing entries are
    /// never modified.
    pub fn ensure_through(&mut self, quarter: usize) {
        if self.entries.len() <= quarter {
            self.entries.resize(quarter + 1, [0; 2]);
        }
    }

    pub fn get(&self, quarter: usize, team: Team) -> u8 {
        self.entries
            .get(quarter)
            .map(|entry| entry[team.index()])
            .unwrap_or(0)
    }

    /// Apply `delta`, clamped to `[0, max]`, and return the new value
    pub fn adjust(&mut self, quarter: usize, team: Team, delta: i32) -> u8 {
        self.ensure_through(quarter);
        let slot = &mut self.entries[quarter][team.index()];
        let updated = i32::from(*slot)
            .saturating_add(delta)
            .clamp(0, i32::from(self.max));
        // clamp keeps it within u8
        *slot = updated as u8;
        *slot
    }

    /// Back to a single zeroed quarter
    pub fn clear(&mut self) {
        self.entries.clear();
        self.entries.push([0; 2]);
    }
}

/// Quarter navigation and per-quarter counters for one game
#[derive(Debug, Clone)]
pub struct GameSession {
    quarter: usize,
    fouls: QuarterCounters,
    timeouts: QuarterCounters,
    mode: GameMode,
}

impl GameSession {
    pub fn new(mode: GameMode) -> Self {
        Self {
            quarter: 0,
            fouls: QuarterCounters::new(MAX_FOULS),
            timeouts: QuarterCounters::new(MAX_TIMEOUTS),
            mode,
        }
    }

    pub fn quarter(&self) -> usize {
        self.quarter
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn fouls(&self) -> &QuarterCounters {
        &self.fouls
    }

    pub fn timeouts(&self) -> &QuarterCounters {
        &self.timeouts
    }

    /// Move to the next quarter. The number of quarters is unbounded so any
    /// number of overtime periods can be played.
    pub fn advance_quarter(&mut self) -> usize {
        self.quarter += 1;
        self.fouls.ensure_through(self.quarter);
        self.timeouts.ensure_through(self.quarter);
        self.quarter
    }

    /// Step back one quarter, keeping every counter
    pub fn regress_quarter(&mut self) -> usize {
        self.quarter = self.quarter.saturating_sub(1);
        self.quarter
    }

    pub fn adjust_foul(&mut self, team: Team, delta: i32) -> u8 {
        self.fouls.adjust(self.quarter, team, delta)
    }

    pub fn adjust_timeout(&mut self, team: Team, delta: i32) -> u8 {
        self.timeouts.adjust(self.quarter, team, delta)
    }

    /// Advance into an overtime period and return the length the game clock
    /// should be reset to
    pub fn apply_overtime(&mut self) -> Duration {
        self.advance_quarter();
        self.mode.overtime()
    }

    /// Switch presets and return the new regulation length for the game clock.
    /// Quarter and counters are left alone.
    pub fn change_mode(&mut self, mode: GameMode) -> Duration {
        self.mode = mode;
        mode.regulation()
    }

    /// Clear everything back to the first quarter and return the regulation
    /// length for the game clock
    pub fn reset_all(&mut self) -> Duration {
        self.quarter = 0;
        self.fouls.clear();
        self.timeouts.clear();
        self.mode.regulation()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            quarter: self.quarter,
            mode: self.mode,
            home_fouls: self.fouls.get(self.quarter, Team::Home),
            away_fouls: self.fouls.get(self.quarter, Team::Away),
            home_timeouts: self.timeouts.get(self.quarter, Team::Home),
            away_timeouts: self.timeouts.get(self.quarter, Team::Away),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

/// Current-quarter view of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub quarter: usize,
    pub mode: GameMode,
    pub home_fouls: u8,
    pub away_fouls: u8,
    pub home_timeouts: u8,
    pub away_timeouts: u8,
}
