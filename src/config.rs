//! Configuration and CLI argument handling

use clap::Parser;

use crate::services::AlertSink;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-timer")]
#[command(about = "A state-managed HTTP server hosting a Pomodoro focus/break timer")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "25250")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial focus duration in minutes (5 to 60)
    #[arg(long, default_value = "25")]
    pub focus_minutes: u32,

    /// Initial break duration in minutes (1 to 15)
    #[arg(long, default_value = "5")]
    pub break_minutes: u32,

    /// Shell command to run whenever focus or break time is over
    #[arg(long)]
    pub alert_command: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn focus_seconds(&self) -> u32 {
        self.focus_minutes.saturating_mul(60)
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_minutes.saturating_mul(60)
    }

    /// Pick the alert sink: a command when one is configured, logging otherwise
    pub fn alert_sink(&self) -> AlertSink {
        match &self.alert_command {
            Some(command) if !command.trim().is_empty() => AlertSink::Command(command.clone()),
            _ => AlertSink::Log,
        }
    }
}
