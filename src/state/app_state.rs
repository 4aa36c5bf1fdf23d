//! Main application state management

use std::{
    sync::{Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::error::TimerError;
use super::{
    DurationField, Field, FieldValue, Mode, ModeTransition, TickOutcome, TimerEngine,
    TimerSnapshot,
};

/// Main application state that owns the timer engine
#[derive(Debug)]
pub struct AppState {
    /// The single timer engine; every operation locks it for its whole duration
    engine: Mutex<TimerEngine>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Running flag watched by the tick driver
    pub running_tx: watch::Sender<bool>,
    /// Mode transitions, consumed by the alert notifier
    pub transition_tx: broadcast::Sender<ModeTransition>,
}

impl AppState {
    /// Create a new AppState around an idle engine
    pub fn new(port: u16, host: String, engine: TimerEngine) -> Self {
        let (running_tx, _) = watch::channel(engine.is_running());
        let (transition_tx, _) = broadcast::channel(16);

        Self {
            engine: Mutex::new(engine),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            running_tx,
            transition_tx,
        }
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, TimerEngine>, TimerError> {
        self.engine
            .lock()
            .map_err(|e| TimerError::StateLock(e.to_string()))
    }

    /// Apply a mutating operation, then publish the running flag and record the action
    fn update_engine<F, T>(&self, action: &str, updater: F) -> Result<(T, TimerSnapshot), TimerError>
    where
        F: FnOnce(&mut TimerEngine) -> T,
    {
        let mut engine = self.lock_engine()?;
        let result = updater(&mut *engine);
        let snapshot = engine.snapshot();
        // Publish under the lock so the flag order matches the engine order
        self.running_tx.send_replace(engine.is_running());
        drop(engine); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok((result, snapshot))
    }

    /// Toggle between running and paused
    pub fn play_pause(&self) -> Result<TimerSnapshot, TimerError> {
        let (running, snapshot) = self.update_engine("play-pause", |engine| engine.play_pause())?;
        info!(
            "Timer {} in {} mode with {} left",
            if running { "started" } else { "paused" },
            snapshot.mode,
            snapshot.active_left_time
        );
        Ok(snapshot)
    }

    /// Stop and reset the timer
    pub fn stop(&self) -> Result<TimerSnapshot, TimerError> {
        let ((), snapshot) = self.update_engine("stop", |engine| engine.stop())?;
        info!("Timer stopped and reset");
        Ok(snapshot)
    }

    /// Adjust the duration of a mode by `delta` seconds
    pub fn change_max(&self, mode: Mode, delta: i64) -> Result<TimerSnapshot, TimerError> {
        let action = format!("change-max-{}", mode);
        let (new_max, snapshot) =
            self.update_engine(&action, |engine| engine.change_max(mode, delta))?;
        info!("{} duration changed by {}s, now {}s", mode, delta, new_max);
        Ok(snapshot)
    }

    /// Advance the timer by one second.
    ///
    /// Returns `None` without touching the state when the timer is not running,
    /// so a tick that was already scheduled when the user paused is dropped.
    pub fn tick(&self) -> Result<Option<TickOutcome>, TimerError> {
        let mut engine = self.lock_engine()?;
        if !engine.is_running() {
            return Ok(None);
        }
        let outcome = engine.tick();
        drop(engine);

        match outcome {
            TickOutcome::Counted { mode, left } => {
                debug!("Tick: {} has {}s left", mode, left);
            }
            TickOutcome::Switched(transition) => {
                info!("{} finished, switching to {}", transition.from, transition.to);
                // No receivers just means nobody is listening for alerts
                if let Err(e) = self.transition_tx.send(transition) {
                    warn!("No listener for mode transition: {}", e);
                }
            }
        }
        Ok(Some(outcome))
    }

    /// Format a duration field as "MM:SS"
    pub fn get_time(&self, field: DurationField) -> Result<String, TimerError> {
        Ok(self.lock_engine()?.get_time(field))
    }

    /// Read a raw field value
    pub fn get(&self, field: Field) -> Result<FieldValue, TimerError> {
        Ok(self.lock_engine()?.get(field))
    }

    /// Get the current display values
    pub fn snapshot(&self) -> Result<TimerSnapshot, TimerError> {
        Ok(self.lock_engine()?.snapshot())
    }

    pub fn is_running(&self) -> bool {
        self.lock_engine().map(|engine| engine.is_running()).unwrap_or(false)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
