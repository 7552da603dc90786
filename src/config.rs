//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::state::{ClockProfile, GameMode};

/// CLI argument parsing structure
#[derive(Debug, Clone, Parser)]
#[command(name = "courtclock")]
#[command(about = "A basketball game clock and shot clock server")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Game mode preset selecting quarter and overtime lengths
    #[arg(short, long, value_enum, default_value = "pro")]
    pub mode: GameMode,

    /// Shot clock length in seconds
    #[arg(short, long, default_value = "24", value_parser = clap::value_parser!(u64).range(1..))]
    pub shot_clock: u64,

    /// Game clock sampling rate in Hz
    #[arg(long, default_value = "20")]
    pub game_hz: u32,

    /// Shot clock sampling rate in Hz
    #[arg(long, default_value = "50")]
    pub shot_hz: u32,

    /// Sound file played when a clock expires
    #[arg(short, long)]
    pub buzzer_sound: Option<PathBuf>,

    /// Program used to play the buzzer sound
    #[arg(long, default_value = "aplay")]
    pub player: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn shot_clock_duration(&self) -> Duration {
        Duration::from_secs(self.shot_clock)
    }

    pub fn game_profile(&self) -> ClockProfile {
        ClockProfile::game(self.mode.regulation(), self.game_hz)
    }

    pub fn shot_profile(&self) -> ClockProfile {
        ClockProfile::shot(self.shot_clock_duration(), self.shot_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["courtclock"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.mode, GameMode::Pro);
        assert_eq!(config.game_profile().default_duration, Duration::from_secs(600));
        assert_eq!(config.shot_profile().refresh_interval(), Duration::from_millis(20));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn mode_and_rates_from_args() {
        let config = Config::try_parse_from([
            "courtclock", "--mode", "junior", "--shot-clock", "14", "--game-hz", "0", "-v",
        ])
        .unwrap();
        assert_eq!(config.game_profile().default_duration, Duration::from_secs(480));
        assert_eq!(config.game_profile().refresh_hz, 1);
        assert_eq!(config.shot_clock_duration(), Duration::from_secs(14));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn zero_length_shot_clock_is_rejected() {
        assert!(Config::try_parse_from(["courtclock", "--shot-clock", "0"]).is_err());
        assert!(Config::try_parse_from(["courtclock", "--shot-clock", "1"]).is_ok());
    }
}
