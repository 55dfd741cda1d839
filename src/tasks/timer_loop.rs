//! Per-session tick loop

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// One second, the only resolution the timer has
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Drive the session started as `generation` until it stops or is replaced
pub async fn timer_loop_task(state: Arc<AppState>, generation: u64) {
    info!("Starting tick loop for session {}", generation);

    // First tick one period after start
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.tick(generation) {
            Ok(Some(outcome)) => {
                if !outcome.alerts.is_empty() {
                    debug!("Tick at {}: {:?}", outcome.snapshot.primary, outcome.alerts);
                }
                if outcome.finished {
                    // Leave the final reading up for one period, as the
                    // clock would show it before resetting
                    interval.tick().await;
                    if let Err(e) = state.publish_idle(generation) {
                        error!("Failed to publish idle display: {}", e);
                    }
                    info!("Session {} finished", generation);
                    break;
                }
            }
            Ok(None) => {
                debug!("Session {} no longer active, leaving tick loop", generation);
                break;
            }
            Err(e) => {
                error!("Tick failed for session {}: {}", generation, e);
                break;
            }
        }
    }
}
