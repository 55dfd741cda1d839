//! Shared host state wrapping the timer engine

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use super::{AlertEvent, DisplaySnapshot, Notices, TickOutcome, TimerConfig, TimerEngine};
use crate::{error::TimerError, services::HornSettings, tasks::timer_loop_task};

/// Receiving end of the horn event channel
pub type AlertReceiver = mpsc::UnboundedReceiver<AlertEvent>;

/// Host state shared between the HTTP handlers and background tasks
#[derive(Debug)]
pub struct AppState {
    /// The timer engine; every read and write goes through this lock
    pub engine: Arc<Mutex<TimerEngine>>,
    /// Non-fatal failures for the user to see
    pub notices: Arc<Mutex<Notices>>,
    /// Horn playback settings
    pub horn: HornSettings,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Latest display snapshot for the display surface
    pub display_tx: watch::Sender<DisplaySnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _display_rx: watch::Receiver<DisplaySnapshot>,
    /// Horn events for the player task
    pub alert_tx: mpsc::UnboundedSender<AlertEvent>,
}

impl AppState {
    /// Create the host state and the receiver the horn player consumes
    pub fn new(
        port: u16,
        host: String,
        config: TimerConfig,
        horn: HornSettings,
    ) -> Result<(Self, AlertReceiver), TimerError> {
        let engine = TimerEngine::new(config)?;
        let (display_tx, display_rx) = watch::channel(engine.snapshot());
        let (alert_tx, alert_rx) = mpsc::unbounded_channel();

        let state = Self {
            engine: Arc::new(Mutex::new(engine)),
            notices: Arc::new(Mutex::new(Notices::new())),
            horn,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            display_tx,
            _display_rx: display_rx,
            alert_tx,
        };
        Ok((state, alert_rx))
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, TimerEngine>, TimerError> {
        self.engine
            .lock()
            .map_err(|e| TimerError::StateUnavailable(format!("Failed to lock timer engine: {}", e)))
    }

    /// Publish a snapshot. Callers hold the engine guard so the display
    /// order matches the order of engine transitions.
    fn publish(&self, _engine: &TimerEngine, snapshot: DisplaySnapshot) {
        // send_replace never fails, even with no receivers left
        self.display_tx.send_replace(snapshot);
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Apply new timer parameters
    pub fn configure(&self, config: TimerConfig) -> Result<DisplaySnapshot, TimerError> {
        let mut engine = self.lock_engine()?;
        let snapshot = engine.configure(config)?;
        let running = engine.is_running();
        if !running {
            self.publish(&engine, snapshot.clone());
        }
        drop(engine);

        if running {
            info!("Configuration accepted, applies on next start");
        }
        self.record_action("configure");
        Ok(snapshot)
    }

    /// Start a session and spawn its tick loop
    pub fn start(self: &Arc<Self>) -> Result<DisplaySnapshot, TimerError> {
        let mut engine = self.lock_engine()?;
        let generation = engine.start()?;
        let snapshot = engine.snapshot();
        self.publish(&engine, snapshot.clone());
        drop(engine);

        self.record_action("start");

        tokio::spawn(timer_loop_task(Arc::clone(self), generation));
        Ok(snapshot)
    }

    /// Stop the clock. Safe to call while a tick is in flight.
    pub fn stop(&self) -> Result<DisplaySnapshot, TimerError> {
        let mut engine = self.lock_engine()?;
        let snapshot = engine.stop();
        self.publish(&engine, snapshot.clone());
        drop(engine);

        self.record_action("stop");
        Ok(snapshot)
    }

    /// Tick the session started as `generation`.
    ///
    /// Returns `None` once that session is over, either stopped or replaced
    /// by a newer start. Alerts are forwarded to the horn player.
    pub fn tick(&self, generation: u64) -> Result<Option<TickOutcome>, TimerError> {
        let mut engine = self.lock_engine()?;
        if !engine.is_session(generation) {
            return Ok(None);
        }
        let outcome = engine.tick()?;
        self.publish(&engine, outcome.snapshot.clone());
        drop(engine);

        for alert in &outcome.alerts {
            if let Err(e) = self.alert_tx.send(*alert) {
                warn!("Failed to queue horn event: {}", e);
            }
        }
        Ok(Some(outcome))
    }

    /// Publish the idle display after a natural finish, unless a new
    /// session has started in the meantime
    pub fn publish_idle(&self, generation: u64) -> Result<(), TimerError> {
        let engine = self.lock_engine()?;
        if engine.generation() == generation && !engine.is_running() {
            self.publish(&engine, engine.snapshot());
        }
        Ok(())
    }

    /// Latest published display snapshot
    pub fn get_display(&self) -> DisplaySnapshot {
        self.display_tx.borrow().clone()
    }

    /// Subscribe to display snapshot changes
    pub fn subscribe_display(&self) -> watch::Receiver<DisplaySnapshot> {
        self.display_tx.subscribe()
    }

    /// Configuration the clock reflects and the one the next start will use
    pub fn get_configs(&self) -> Result<(TimerConfig, TimerConfig), TimerError> {
        let engine = self.lock_engine()?;
        Ok((*engine.session_config(), *engine.config()))
    }

    pub fn is_running(&self) -> Result<bool, TimerError> {
        Ok(self.lock_engine()?.is_running())
    }

    /// Add a user-visible notice
    pub fn add_notice(&self, notice: String) {
        match self.notices.lock() {
            Ok(mut notices) => {
                warn!("Adding notice: {}", notice);
                notices.add(notice);
            }
            Err(e) => error!("Failed to lock notices: {}", e),
        }
    }

    /// Clear notices for a specific component
    pub fn clear_notices_for(&self, component: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.clear_for(component);
        }
    }

    pub fn get_notices(&self) -> Vec<String> {
        self.notices
            .lock()
            .map(|notices| notices.messages.clone())
            .unwrap_or_default()
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
