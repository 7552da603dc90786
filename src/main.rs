//! Court Clock - A basketball game clock and shot clock server
//!
//! This is the main entry point for the courtclock application.

use std::{future::IntoFuture, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use courtclock::{
    config::Config,
    state::AppState,
    api::create_router,
    services::select_sounder,
    tasks::{buzzer_task, clock_ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("courtclock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting courtclock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, mode={:?}, shot clock={}s",
          config.host, config.port, config.mode, config.shot_clock);

    let state = Arc::new(AppState::from_config(&config));

    // One ticker per clock, each at its own cadence
    tokio::spawn(clock_ticker_task(state.game_clock.clone()));
    tokio::spawn(clock_ticker_task(state.shot_clock.clone()));

    let sounder = select_sounder(&config.player, config.buzzer_sound.clone()).await;
    tokio::spawn(buzzer_task(Arc::clone(&state), sounder));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /clock/:role/start|stop|reset  - Control the game or shot clock");
    info!("  POST /shot-clock/preset/:preset     - Reset the shot clock to 24 (full) or 14 (short)");
    info!("  GET  /clock/:role[/stream]          - Clock snapshot or live event stream");
    info!("  POST /session/...                   - Quarters, fouls, timeouts, overtime, mode, reset");
    info!("  GET  /status                        - Full scoreboard status");
    info!("  GET  /health                        - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app).into_future();

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
