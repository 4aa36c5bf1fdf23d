//! State management module
//!
//! This module contains the timer state record, the engine that mutates it,
//! and the application state that owns the engine.

pub mod timer_state;
pub mod engine;
pub mod app_state;

// Re-export main types
pub use timer_state::{
    format_mm_ss, Bounds, DurationField, Field, FieldValue, Mode, TimerState, BREAK_BOUNDS,
    FOCUS_BOUNDS,
};
pub use engine::{ModeTransition, TickOutcome, TimerEngine, TimerSnapshot};
pub use app_state::AppState;
