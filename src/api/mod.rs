//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

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
        .route("/play-pause", post(play_pause_handler))
        .route("/stop", post(stop_handler))
        // One route per duration control
        .route("/focus/increase", post(focus_increase_handler))
        .route("/focus/decrease", post(focus_decrease_handler))
        .route("/break/increase", post(break_increase_handler))
        .route("/break/decrease", post(break_decrease_handler))
        .route("/max/:mode", post(change_max_handler))
        .route("/time/:field", get(time_handler))
        .route("/field/:field", get(field_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
