//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::{debug, info};

use crate::{
    error::TimerError,
    state::{AppState, DurationField, Field, Mode},
};
use super::responses::{
    ApiResponse, ChangeMaxRequest, FieldResponse, HealthResponse, StatusResponse, TimeResponse,
};

/// Handle POST /play-pause - Start or pause the countdown
pub async fn play_pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, TimerError> {
    let snapshot = state.play_pause()?;
    let message = if snapshot.state.is_running {
        format!("Timer running in {} mode", snapshot.mode)
    } else {
        format!("Timer paused with {} left", snapshot.active_left_time)
    };
    Ok(Json(ApiResponse::new(message, snapshot)))
}

/// Handle POST /stop - Stop and reset the timer
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, TimerError> {
    let snapshot = state.stop()?;
    Ok(Json(ApiResponse::new("Timer stopped".to_string(), snapshot)))
}

/// Apply one step of the standard increase/decrease controls
fn step_max(state: &AppState, mode: Mode, direction: i64) -> Result<Json<ApiResponse>, TimerError> {
    let snapshot = state.change_max(mode, direction * mode.standard_step())?;
    let time = match mode {
        Mode::Focus => &snapshot.focus_max_time,
        Mode::Break => &snapshot.break_max_time,
    };
    let message = format!("{} duration set to {}", mode, time);
    Ok(Json(ApiResponse::new(message, snapshot)))
}

/// Handle POST /focus/increase - Add five minutes of focus
pub async fn focus_increase_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, TimerError> {
    step_max(&state, Mode::Focus, 1)
}

/// Handle POST /focus/decrease - Remove five minutes of focus
pub async fn focus_decrease_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, TimerError> {
    step_max(&state, Mode::Focus, -1)
}

/// Handle POST /break/increase - Add one minute of break
pub async fn break_increase_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, TimerError> {
    step_max(&state, Mode::Break, 1)
}

/// Handle POST /break/decrease - Remove one minute of break
pub async fn break_decrease_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, TimerError> {
    step_max(&state, Mode::Break, -1)
}

/// Handle POST /max/:mode - Change a mode's duration by an arbitrary delta
pub async fn change_max_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
    Json(request): Json<ChangeMaxRequest>,
) -> Result<Json<ApiResponse>, TimerError> {
    let mode: Mode = mode.parse()?;
    let snapshot = state.change_max(mode, request.delta)?;
    info!("Custom {} change of {}s requested", mode, request.delta);
    let message = format!("{} duration changed by {}s", mode, request.delta);
    Ok(Json(ApiResponse::new(message, snapshot)))
}

/// Handle GET /time/:field - Formatted MM:SS value of a duration field
pub async fn time_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
) -> Result<Json<TimeResponse>, TimerError> {
    let duration_field: DurationField = field.parse()?;
    let time = state.get_time(duration_field)?;
    debug!("Time for {}: {}", field, time);
    Ok(Json(TimeResponse {
        field: Field::from(duration_field).name().to_string(),
        time,
    }))
}

/// Handle GET /field/:field - Raw value of any state field
pub async fn field_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
) -> Result<Json<FieldResponse>, TimerError> {
    let field: Field = field.parse()?;
    let value = state.get(field)?;
    Ok(Json(FieldResponse {
        field: field.name().to_string(),
        value,
    }))
}

/// Handle GET /status - Full display state
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, TimerError> {
    let timer = state.snapshot()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
