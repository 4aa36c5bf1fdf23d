//! Alert sinks fired when the timer switches mode

use std::time::Duration;
use tokio::{process::Command, time::timeout};
use tracing::debug;

use crate::{error::TimerError, state::ModeTransition};

/// Longest an alert command may run before it is killed
pub const ALERT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where mode-transition alerts go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertSink {
    /// Only write a log line
    Log,
    /// Run a shell command, e.g. an audio player with a chime
    Command(String),
}

impl AlertSink {
    /// Fire the alert for one transition.
    ///
    /// The command gets `POMODORO_FROM` and `POMODORO_TO` in its environment.
    pub async fn fire(&self, transition: ModeTransition) -> Result<(), TimerError> {
        self.fire_within(transition, ALERT_TIMEOUT).await
    }

    /// Fire the alert, killing the command if it outlives `limit`
    pub async fn fire_within(
        &self,
        transition: ModeTransition,
        limit: Duration,
    ) -> Result<(), TimerError> {
        debug!("Alert: {} is over, time for {}", transition.from, transition.to);

        let AlertSink::Command(command) = self else {
            return Ok(());
        };

        debug!("Running alert command: {}", command);
        let run = Command::new("sh")
            .args(["-c", command.as_str()])
            .env("POMODORO_FROM", transition.from.as_str())
            .env("POMODORO_TO", transition.to.as_str())
            .kill_on_drop(true)
            .output();

        let output = timeout(limit, run)
            .await
            .map_err(|_| TimerError::Alert(format!("'{}' timed out after {:?}", command, limit)))?
            .map_err(|e| TimerError::Alert(format!("failed to run '{}': {}", command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TimerError::Alert(format!(
                "'{}' exited with {}: {}",
                command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
