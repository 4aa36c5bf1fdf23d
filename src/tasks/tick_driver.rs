//! Tick driver background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Cadence of the countdown
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Background task that ticks the timer once per second while it is running.
///
/// The running flag is the enable signal: while it is false no interval
/// exists, and as soon as it turns false the interval is dropped.
/// The task exits once the last other handle to the state is dropped.
pub async fn tick_driver_task(state: Arc<AppState>) {
    info!("Starting tick driver task");

    let mut running_rx = state.running_tx.subscribe();
    // Only a weak handle is kept, so the running channel closes with the state
    let weak_state = Arc::downgrade(&state);
    drop(state);

    loop {
        let running = *running_rx.borrow_and_update();
        if !running {
            // Wait for play
            if running_rx.changed().await.is_err() {
                break;
            }
            continue;
        }

        debug!("Timer running, scheduling ticks every {:?}", TICK_INTERVAL);
        let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let Some(state) = weak_state.upgrade() else {
                        info!("Tick driver task exiting");
                        return;
                    };
                    if let Err(e) = state.tick() {
                        error!("Failed to tick timer: {}", e);
                    }
                }

                changed = running_rx.changed() => {
                    if changed.is_err() {
                        info!("Tick driver task exiting");
                        return;
                    }
                    if !*running_rx.borrow_and_update() {
                        debug!("Timer paused, tick driver idle");
                        break;
                    }
                }
            }
        }
    }

    info!("Tick driver task exiting");
}
