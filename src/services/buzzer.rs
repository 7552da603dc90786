//! Buzzer playback for expired clocks

use std::{path::PathBuf, sync::Arc};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::state::ClockRole;

/// What a sounder did with an expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buzz {
    /// Playback was started
    Played,
    /// Only written to the log
    Logged,
    /// Nothing could be played; the expiry passed silently
    Silent,
}

/// Turns an expiry into sound. Implementations must return immediately.
pub trait Sounder: Send + Sync {
    fn sound(&self, role: ClockRole) -> Buzz;
}

/// Only logs the buzzer; used when no sound is configured or playable
#[derive(Debug, Clone, Default)]
pub struct LogSounder;

impl Sounder for LogSounder {
    fn sound(&self, role: ClockRole) -> Buzz {
        info!("BUZZ: {} clock expired", role);
        Buzz::Logged
    }
}

/// Plays a sound file through an external player program
#[derive(Debug, Clone)]
pub struct CommandSounder {
    pub program: String,
    pub sound_file: PathBuf,
}

impl CommandSounder {
    pub fn new(program: impl Into<String>, sound_file: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            sound_file: sound_file.into(),
        }
    }
}

impl Sounder for CommandSounder {
    fn sound(&self, role: ClockRole) -> Buzz {
        if !self.sound_file.is_file() {
            warn!("Buzzer sound {:?} missing, {} clock expired silently", self.sound_file, role);
            return Buzz::Silent;
        }

        let child = Command::new(&self.program)
            .arg(&self.sound_file)
            .spawn();

        match child {
            Ok(mut child) => {
                debug!("Buzzer playing for {} clock", role);
                tokio::spawn(async move {
                    match child.wait().await {
                        Ok(status) if !status.success() => {
                            warn!("Buzzer player exited with {}", status);
                        }
                        Err(e) => warn!("Failed to wait for buzzer player: {}", e),
                        Ok(_) => {}
                    }
                });
                Buzz::Played
            }
            Err(e) => {
                warn!("Failed to start buzzer player {}: {}", self.program, e);
                Buzz::Silent
            }
        }
    }
}

/// Check that the player program can be executed
pub async fn check_player_available(program: &str) -> Result<(), String> {
    Command::new(program)
        .arg("--version")
        .output()
        .await
        .map_err(|e| format!("{} is not available: {}", program, e))?;

    info!("{} is available", program);
    Ok(())
}

/// Pick the sounder for the configured sound file and player
pub async fn select_sounder(program: &str, sound_file: Option<PathBuf>) -> Arc<dyn Sounder> {
    let Some(sound_file) = sound_file else {
        info!("No buzzer sound configured, logging expirations only");
        return Arc::new(LogSounder);
    };

    match check_player_available(program).await {
        Ok(()) => Arc::new(CommandSounder::new(program, sound_file)),
        Err(e) => {
            warn!("{}, buzzer will only be logged", e);
            Arc::new(LogSounder)
        }
    }
}
