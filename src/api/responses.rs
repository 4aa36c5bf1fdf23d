//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    error::TimerError,
    state::{FieldValue, TimerSnapshot},
};

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response, deriving the status from the timer
    pub fn new(message: String, timer: TimerSnapshot) -> Self {
        let status = if timer.state.is_running {
            "running"
        } else if timer.state.session_started {
            "paused"
        } else {
            "idle"
        };

        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Request body for POST /max/:mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeMaxRequest {
    pub delta: i64,
}

/// Response for GET /time/:field
#[derive(Debug, Clone, Serialize)]
pub struct TimeResponse {
    pub field: String,
    pub time: String,
}

/// Response for GET /field/:field
#[derive(Debug, Clone, Serialize)]
pub struct FieldResponse {
    pub field: String,
    pub value: FieldValue,
}

/// Status response with server information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error body returned for failed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl IntoResponse for TimerError {
    fn into_response(self) -> Response {
        let code = if self.is_invalid_argument() {
            StatusCode::BAD_REQUEST
        } else {
            error!("Request failed: {}", self);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.to_string(),
        };
        (code, Json(body)).into_response()
    }
}
