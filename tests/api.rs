use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use pomodoro_timer::{create_router, AppState, TimerEngine};

fn app() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(25250, "127.0.0.1".to_string(), TimerEngine::new()));
    (Arc::clone(&state), create_router(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_status_reports_defaults() {
    let (_, app) = app();
    let (status, body) = send(&app, Method::GET, "/status", None).await;

    assert_eq!(status, StatusCode::OK);
    let timer = &body["timer"];
    assert_eq!(timer["focusMax"], 1500);
    assert_eq!(timer["breakMax"], 300);
    assert_eq!(timer["focusMaxTime"], "25:00");
    assert_eq!(timer["breakMaxTime"], "05:00");
    assert_eq!(timer["mode"], "focus");
    assert_eq!(timer["progressPercent"], 0.0);
    assert_eq!(body["port"], 25250);
    assert_eq!(body["last_action"], Value::Null);
}

#[tokio::test]
async fn test_play_pause_then_stop() {
    let (state, app) = app();

    let (status, body) = send(&app, Method::POST, "/play-pause", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["isRunning"], true);
    assert_eq!(body["timer"]["sessionStarted"], true);
    assert!(state.is_running());

    state.tick().unwrap();
    let (_, body) = send(&app, Method::POST, "/play-pause", None).await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["timer"]["focusLeft"], 1499);
    assert_eq!(body["timer"]["sessionStarted"], true);

    let (_, body) = send(&app, Method::POST, "/stop", None).await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["focusLeft"], 1500);
    assert_eq!(body["timer"]["sessionStarted"], false);
    assert!(!state.is_running());
}

#[tokio::test]
async fn test_focus_decrease_clamps_at_floor() {
    let (_, app) = app();
    for _ in 0..5 {
        let (status, _) = send(&app, Method::POST, "/focus/decrease", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, Method::GET, "/time/focusMax", None).await;
    assert_eq!(body, json!({ "field": "focusMax", "time": "05:00" }));
}

#[tokio::test]
async fn test_break_increase_clamps_at_roof() {
    let (_, app) = app();
    let mut last = Value::Null;
    for _ in 0..11 {
        let (_, body) = send(&app, Method::POST, "/break/increase", None).await;
        last = body;
    }

    assert_eq!(last["timer"]["breakMax"], 900);
    assert_eq!(last["timer"]["breakLeft"], 900);
    assert_eq!(last["message"], "break duration set to 15:00");
}

#[tokio::test]
async fn test_change_max_with_custom_delta() {
    let (_, app) = app();
    let (status, body) =
        send(&app, Method::POST, "/max/focus", Some(json!({ "delta": 120 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["focusMax"], 1620);
    assert_eq!(body["timer"]["focusLeftTime"], "27:00");
}

#[tokio::test]
async fn test_unknown_mode_is_rejected() {
    let (_, app) = app();
    let (status, body) = send(&app, Method::POST, "/max/nap", Some(json!({ "delta": 60 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "unknown mode 'nap', expected 'focus' or 'break'");
}

#[tokio::test]
async fn test_unknown_and_non_duration_fields_are_rejected() {
    let (_, app) = app();

    let (status, body) = send(&app, Method::GET, "/time/lunchLeft", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "unknown field 'lunchLeft'");

    let (status, body) = send(&app, Method::GET, "/time/isRunning", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "field 'isRunning' is not a duration");
}

#[tokio::test]
async fn test_field_returns_raw_values() {
    let (_, app) = app();

    let (status, body) = send(&app, Method::GET, "/field/break_left", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "field": "breakLeft", "value": 300 }));

    let (_, body) = send(&app, Method::GET, "/field/focus", None).await;
    assert_eq!(body, json!({ "field": "focus", "value": true }));
}

#[tokio::test]
async fn test_health() {
    let (_, app) = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
