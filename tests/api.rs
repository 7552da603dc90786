use std::{sync::Arc, time::Duration};
use axum::{
    body::{to_bytes, Body, BodyDataStream},
    http::{header, Method, Request, StatusCode},
    Router,
};
use clap::Parser;
use futures::StreamExt;
use serde_json::{json, Value};
use tokio::time::timeout;
use tower::ServiceExt;

use courtclock::{create_router, state::ClockRole, AppState, Config};

fn app(args: &[&str]) -> (Router, Arc<AppState>) {
    let mut argv = vec!["courtclock"];
    argv.extend_from_slice(args);
    let config = Config::try_parse_from(argv).unwrap();
    let state = Arc::new(AppState::from_config(&config));
    (create_router(Arc::clone(&state)), state)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = app(&[]);
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn start_and_stop_game_clock() {
    let (app, _) = app(&[]);

    let (status, body) = call(&app, Method::POST, "/clock/game/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["clock"]["running"], true);

    let (_, body) = call(&app, Method::POST, "/clock/game/stop", None).await;
    assert_eq!(body["clock"]["running"], false);
    let remaining = body["clock"]["remaining_seconds"].as_f64().unwrap();
    assert!(remaining > 599.0 && remaining <= 600.0);
}

#[tokio::test]
async fn reset_with_and_without_duration() {
    let (app, _) = app(&[]);

    let (status, body) = call(&app, Method::POST, "/clock/shot/reset", Some(json!({ "seconds": 14.0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clock"]["display"], "14.0");

    call(&app, Method::POST, "/clock/shot/start", None).await;
    let (_, body) = call(&app, Method::POST, "/clock/shot/reset", None).await;
    assert_eq!(body["clock"]["running"], false);
    assert_eq!(body["clock"]["remaining_seconds"], 14.0);
}

#[tokio::test]
async fn invalid_reset_is_rejected() {
    let (app, _) = app(&[]);

    let (status, _) = call(&app, Method::POST, "/clock/game/reset", Some(json!({ "seconds": -3.0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, Method::POST, "/clock/game/reset", Some(json!({ "seconds": 0.0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, Method::POST, "/clock/period/start", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn shot_presets() {
    let (app, _) = app(&[]);

    let (_, body) = call(&app, Method::POST, "/shot-clock/preset/short", None).await;
    assert_eq!(body["clock"]["configured_seconds"], 14.0);

    let (_, body) = call(&app, Method::POST, "/shot-clock/preset/full", None).await;
    assert_eq!(body["clock"]["display"], "24.0");
}

#[tokio::test]
async fn fouls_clamp_through_api() {
    let (app, _) = app(&[]);

    for _ in 0..10 {
        call(&app, Method::POST, "/session/foul", Some(json!({ "team": "home", "delta": 1 }))).await;
    }
    let (_, body) = call(&app, Method::POST, "/session/timeout", Some(json!({ "team": "away" }))).await;

    assert_eq!(body["session"]["home_fouls"], 5);
    assert_eq!(body["session"]["away_timeouts"], 1);
}

#[tokio::test]
async fn quarter_navigation_is_non_destructive() {
    let (app, _) = app(&[]);

    call(&app, Method::POST, "/session/foul", Some(json!({ "team": "away", "delta": 2 }))).await;
    call(&app, Method::POST, "/session/quarter/next", None).await;
    let (_, body) = call(&app, Method::POST, "/session/quarter/prev", None).await;

    assert_eq!(body["session"]["quarter"], 0);
    assert_eq!(body["session"]["away_fouls"], 2);
}

#[tokio::test]
async fn overtime_and_mode_reset_game_clock() {
    let (app, state) = app(&["--mode", "mini"]);

    let (_, body) = call(&app, Method::POST, "/session/overtime", None).await;
    assert_eq!(body["session"]["quarter"], 1);
    assert_eq!(state.game_clock.snapshot().unwrap().display, "03:00");

    let (status, body) = call(&app, Method::POST, "/session/mode", Some(json!({ "mode": "pro" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["mode"], "pro");
    assert_eq!(state.game_clock.snapshot().unwrap().display, "10:00");
}

#[tokio::test]
async fn reset_all_and_status() {
    let (app, _) = app(&[]);

    call(&app, Method::POST, "/clock/shot/reset", Some(json!({ "seconds": 5.0 }))).await;
    call(&app, Method::POST, "/session/quarter/next", None).await;
    call(&app, Method::POST, "/session/reset", None).await;

    let (status, body) = call(&app, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["quarter"], 0);
    assert_eq!(body["game_clock"]["display"], "10:00");
    assert_eq!(body["shot_clock"]["display"], "24.0");
    assert_eq!(body["shot_buzzers"], 0);
    assert_eq!(body["last_action"], "reset-all");
}

#[tokio::test]
async fn extreme_foul_delta_is_clamped_and_session_stays_usable() {
    let (app, _) = app(&[]);

    let (status, body) = call(&app, Method::POST, "/session/foul", Some(json!({ "team": "home", "delta": i32::MAX }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["home_fouls"], 5);

    let (status, body) = call(&app, Method::POST, "/session/foul", Some(json!({ "team": "home", "delta": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["home_fouls"], 5);

    let (status, body) = call(&app, Method::POST, "/session/timeout", Some(json!({ "team": "away", "delta": i32::MIN }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["away_timeouts"], 0);
}

#[tokio::test]
async fn malformed_reset_body_is_rejected() {
    let (app, state) = app(&[]);
    call(&app, Method::POST, "/clock/shot/reset", Some(json!({ "seconds": 14.0 }))).await;
    call(&app, Method::POST, "/clock/shot/start", None).await;

    let (status, _) = call(&app, Method::POST, "/clock/shot/reset", Some(json!({ "seconds": "five" }))).await;
    assert!(status.is_client_error());
    assert!(state.shot_clock.snapshot().unwrap().running);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/clock/shot/reset")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
    assert!(state.shot_clock.snapshot().unwrap().running);
}

async fn next_frame(frames: &mut BodyDataStream) -> String {
    let chunk = timeout(Duration::from_secs(2), frames.next())
        .await
        .expect("event should arrive")
        .expect("stream should stay open")
        .expect("frame should be readable");
    String::from_utf8(chunk.to_vec()).unwrap()
}

#[tokio::test]
async fn snapshot_stream_sends_current_then_changes() {
    let (app, state) = app(&[]);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/clock/shot/stream")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let mut frames = response.into_body().into_data_stream();

    let first = next_frame(&mut frames).await;
    assert!(first.contains("event: snapshot"));
    assert!(first.contains("\"display\":\"24.0\""));

    state.reset_clock(ClockRole::Shot, Some(Duration::from_secs(14))).unwrap();

    let mut received = String::new();
    while !received.contains("\"display\":\"14.0\"") {
        received.push_str(&next_frame(&mut frames).await);
    }
    assert!(received.contains("event: snapshot"));
}
