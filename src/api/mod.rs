//! HTTP API module
//!
//! This module contains the presentation-facing endpoints and their request and
//! response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/clock/:role", get(clock_get_handler))
        .route("/clock/:role/start", post(clock_start_handler))
        .route("/clock/:role/stop", post(clock_stop_handler))
        .route("/clock/:role/reset", post(clock_reset_handler))
        .route("/clock/:role/stream", get(clock_stream_handler))
        .route("/shot-clock/preset/:preset", post(shot_preset_handler))
        .route("/session", get(session_handler))
        .route("/session/quarter/next", post(next_quarter_handler))
        .route("/session/quarter/prev", post(previous_quarter_handler))
        .route("/session/foul", post(foul_handler))
        .route("/session/timeout", post(timeout_handler))
        .route("/session/overtime", post(overtime_handler))
        .route("/session/mode", post(mode_handler))
        .route("/session/reset", post(reset_all_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
