//! Horn player background task

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    services::play_horn,
    state::{AlertReceiver, AppState},
};

/// Play a horn for every alert event. Failures become notices.
///
/// Each horn plays on its own task so a hung player never holds up the
/// horns behind it.
pub async fn horn_player_task(state: Arc<AppState>, mut alerts: AlertReceiver) {
    info!("Starting horn player task");

    while let Some(alert) = alerts.recv().await {
        debug!("Horn requested: {:?}", alert.reason);

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = play_horn(&state.horn).await {
                warn!("Horn playback failed: {}", e);
                state.add_notice(format!("Horn playback failed: {}", e));
            }
        });
    }

    info!("Horn event channel closed, horn player exiting");
}
