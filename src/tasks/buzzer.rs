//! Buzzer task wiring clock expirations to the sounder

use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    services::Sounder,
    state::{AppState, ClockRole},
};

/// Background task that sounds the buzzer whenever either clock expires
pub async fn buzzer_task(state: Arc<AppState>, sounder: Arc<dyn Sounder>) {
    info!("Starting buzzer task");

    let game = state.game_clock.expiry().clone();
    let shot = state.shot_clock.expiry().clone();

    loop {
        let role = tokio::select! {
            _ = game.expired() => ClockRole::Game,
            _ = shot.expired() => ClockRole::Shot,
        };
        let buzz = sounder.sound(role);
        debug!("{} clock buzzer: {:?}", role, buzz);
    }
}
