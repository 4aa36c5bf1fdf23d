//! Pomodoro Timer - A state-managed HTTP server hosting a focus/break timer
//!
//! This is the main entry point for the pomodoro-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_timer::{
    config::Config,
    state::{AppState, TimerEngine},
    api::create_router,
    tasks::{tick_driver_task, transition_alert_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, focus={}min, break={}min",
          config.host, config.port, config.focus_minutes, config.break_minutes);

    // Create application state
    let engine = TimerEngine::with_durations(config.focus_seconds(), config.break_seconds());
    let state = Arc::new(AppState::new(config.port, config.host.clone(), engine));

    // Start the background tasks
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_driver_task(tick_state).await;
    });

    let alert_state = Arc::clone(&state);
    let sink = config.alert_sink();
    tokio::spawn(async move {
        transition_alert_task(alert_state, sink).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /play-pause                  - Start or pause the timer");
    info!("  POST /stop                        - Stop and reset the timer");
    info!("  POST /focus/increase|decrease     - Change focus duration by 5 minutes");
    info!("  POST /break/increase|decrease     - Change break duration by 1 minute");
    info!("  POST /max/:mode {{\"delta\": n}}     - Change a duration by n seconds");
    info!("  GET  /time/:field                 - MM:SS value of a duration field");
    info!("  GET  /field/:field                - Raw value of a state field");
    info!("  GET  /status                      - Full timer display state");
    info!("  GET  /health                      - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
