//! Pomodoro Timer - A state-managed HTTP server hosting a focus/break timer
//!
//! This library provides the timer engine, the application state that owns
//! it, the background tick and alert tasks, and the HTTP API used as the
//! display surface.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use state::{AppState, TimerEngine};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
