//! External side effects module
//!
//! This module contains the sinks that turn timer signals into something the
//! user notices.

pub mod alert;

// Re-export main types
pub use alert::AlertSink;
