//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod tick_driver;
pub mod transition_alert;

// Re-export main functions
pub use tick_driver::{tick_driver_task, TICK_INTERVAL};
pub use transition_alert::transition_alert_task;
