//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc, time::Duration};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tracing::{error, info, warn};

use crate::state::{AppState, ClockRole, SessionSnapshot, ShotPreset, TimerSnapshot};
use super::responses::{
    AdjustRequest, ClockResponse, HealthResponse, ModeRequest, ResetRequest, SessionResponse,
    StatusResponse,
};

type ClockResult = Result<Json<ClockResponse>, StatusCode>;
type SessionResult = Result<Json<SessionResponse>, StatusCode>;

fn clock_reply(result: Result<TimerSnapshot, String>, message: String) -> ClockResult {
    match result {
        Ok(snapshot) => Ok(Json(ClockResponse::new(message, snapshot))),
        Err(e) => {
            error!("{}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn session_reply(result: Result<SessionSnapshot, String>, message: &str) -> SessionResult {
    match result {
        Ok(snapshot) => Ok(Json(SessionResponse::new(message.to_string(), snapshot))),
        Err(e) => {
            error!("{}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /clock/:role/start
pub async fn clock_start_handler(
    State(state): State<Arc<AppState>>,
    Path(role): Path<ClockRole>,
) -> ClockResult {
    clock_reply(state.start_clock(role), format!("{} clock started", role))
}

/// Handle POST /clock/:role/stop
pub async fn clock_stop_handler(
    State(state): State<Arc<AppState>>,
    Path(role): Path<ClockRole>,
) -> ClockResult {
    clock_reply(state.stop_clock(role), format!("{} clock stopped", role))
}

/// Handle POST /clock/:role/reset with an optional `{ "seconds": f64 }` body.
/// A request without a JSON body resets to the configured length; a body that
/// fails to parse is rejected.
pub async fn clock_reset_handler(
    State(state): State<Arc<AppState>>,
    Path(role): Path<ClockRole>,
    body: Result<Json<ResetRequest>, JsonRejection>,
) -> ClockResult {
    let seconds = match body {
        Ok(Json(request)) => request.seconds,
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => {
            warn!("Rejected {} clock reset body: {}", role, rejection.body_text());
            return Err(rejection.status());
        }
    };

    let to = match seconds {
        Some(seconds) => match Duration::try_from_secs_f64(seconds) {
            Ok(duration) if !duration.is_zero() => Some(duration),
            _ => {
                warn!("Rejected {} clock reset to {} seconds", role, seconds);
                return Err(StatusCode::BAD_REQUEST);
            }
        },
        None => None,
    };

    clock_reply(state.reset_clock(role, to), format!("{} clock reset", role))
}

/// Handle POST /shot-clock/preset/:preset
pub async fn shot_preset_handler(
    State(state): State<Arc<AppState>>,
    Path(preset): Path<ShotPreset>,
) -> ClockResult {
    let duration = preset.duration();
    clock_reply(
        state.reset_clock(ClockRole::Shot, Some(duration)),
        format!("shot clock reset to {}s", duration.as_secs()),
    )
}

/// Handle GET /clock/:role
pub async fn clock_get_handler(
    State(state): State<Arc<AppState>>,
    Path(role): Path<ClockRole>,
) -> Result<Json<TimerSnapshot>, StatusCode> {
    state.clock(role).snapshot().map(Json).map_err(|e| {
        error!("{}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

fn snapshot_event(snapshot: &TimerSnapshot) -> Event {
    Event::default()
        .event("snapshot")
        .json_data(snapshot)
        .unwrap_or_else(|e| Event::default().comment(format!("serialization failed: {}", e)))
}

/// Handle GET /clock/:role/stream - current snapshot, then every change
pub async fn clock_stream_handler(
    State(state): State<Arc<AppState>>,
    Path(role): Path<ClockRole>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("Snapshot stream opened for {} clock", role);

    let mut rx = state.clock(role).subscribe();
    let current = snapshot_event(&rx.borrow_and_update());

    let updates = stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let event = snapshot_event(&rx.borrow_and_update());
        Some((event, rx))
    });

    let events = stream::once(async move { current })
        .chain(updates)
        .map(Ok);

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle POST /session/quarter/next
pub async fn next_quarter_handler(State(state): State<Arc<AppState>>) -> SessionResult {
    session_reply(state.advance_quarter(), "Advanced to next quarter")
}

/// Handle POST /session/quarter/prev
pub async fn previous_quarter_handler(State(state): State<Arc<AppState>>) -> SessionResult {
    session_reply(state.regress_quarter(), "Returned to previous quarter")
}

/// Handle POST /session/foul
pub async fn foul_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdjustRequest>,
) -> SessionResult {
    session_reply(state.adjust_foul(request.team, request.delta), "Foul count updated")
}

/// Handle POST /session/timeout
pub async fn timeout_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdjustRequest>,
) -> SessionResult {
    session_reply(state.adjust_timeout(request.team, request.delta), "Timeout count updated")
}

/// Handle POST /session/overtime
pub async fn overtime_handler(State(state): State<Arc<AppState>>) -> SessionResult {
    session_reply(state.apply_overtime(), "Overtime period started")
}

/// Handle POST /session/mode
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ModeRequest>,
) -> SessionResult {
    session_reply(state.change_mode(request.mode), "Game mode changed")
}

/// Handle POST /session/reset
pub async fn reset_all_handler(State(state): State<Arc<AppState>>) -> SessionResult {
    session_reply(state.reset_all(), "Game reset")
}

/// Handle GET /session
pub async fn session_handler(State(state): State<Arc<AppState>>) -> SessionResult {
    session_reply(state.get_session(), "Current session")
}

/// Handle GET /status - Get current scoreboard status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let game_clock = state.game_clock.snapshot();
    let shot_clock = state.shot_clock.snapshot();
    let session = state.get_session();

    match (game_clock, shot_clock, session) {
        (Ok(game_clock), Ok(shot_clock), Ok(session)) => {
            let (last_action, last_action_time) = state.get_last_action();
            Ok(Json(StatusResponse {
                game_clock,
                shot_clock,
                session,
                game_buzzers: state.game_clock.expiry().fired_count(),
                shot_buzzers: state.shot_clock.expiry().fired_count(),
                uptime: state.get_uptime(),
                port: state.port,
                host: state.host.clone(),
                last_action,
                last_action_time,
            }))
        }
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            error!("Failed to build status: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
