//! Mode-transition alert background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use crate::{services::AlertSink, state::AppState};

/// Background task that forwards every mode transition to the alert sink.
///
/// Transitions are handled one at a time, so alerts never overlap.
pub async fn transition_alert_task(state: Arc<AppState>, sink: AlertSink) {
    info!("Starting transition alert task with sink {:?}", sink);

    let mut transition_rx = state.transition_tx.subscribe();
    // Release our handle so the channel closes once the state is dropped
    drop(state);

    loop {
        match transition_rx.recv().await {
            Ok(transition) => {
                if let Err(e) = sink.fire(transition).await {
                    error!("Failed to fire alert: {}", e);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Alert task lagged, {} transitions skipped", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }

    info!("Transition alert task exiting");
}
