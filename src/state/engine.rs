//! Timer engine: the period clock and horn scheduling state machine
//!
//! The engine is a plain synchronous state machine. It never sleeps, never
//! touches audio and never renders anything; the host drives it with
//! [`TimerEngine::tick`] once per second and acts on the returned
//! [`TickOutcome`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    display::DisplaySnapshot,
    timer_state::{Direction, TimerConfig, TimerState, TEN_MINUTES},
};
use crate::error::TimerError;

/// Why a horn event was emitted. Playback treats every reason the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertReason {
    /// An interval boundary was reached
    Interval,
    /// Ten minutes of a countdown period have been played
    TenMinuteMark,
}

/// Request to play the horn once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub reason: AlertReason,
}

impl AlertEvent {
    pub fn new(reason: AlertReason) -> Self {
        Self { reason }
    }
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// Clock as it read at the start of the tick
    pub snapshot: DisplaySnapshot,
    /// Zero, one or two horn events
    pub alerts: Vec<AlertEvent>,
    /// The session reached its bound and the engine stopped itself
    pub finished: bool,
}

/// Owns the timer state and all transitions on it
#[derive(Debug, Clone)]
pub struct TimerEngine {
    /// Latest accepted configuration, used by the next `start`
    config: TimerConfig,
    /// Configuration the clock currently reflects
    session: TimerConfig,
    state: TimerState,
    generation: u64,
}

impl TimerEngine {
    pub fn new(config: TimerConfig) -> Result<Self, TimerError> {
        config.validate()?;
        Ok(Self {
            config,
            session: config,
            state: TimerState::idle(&config),
            generation: 0,
        })
    }

    /// Accept new parameters.
    ///
    /// While stopped the idle projection is recomputed immediately. While
    /// running the parameters are held for the next `start`; the live
    /// session keeps counting with what it started with.
    pub fn configure(&mut self, config: TimerConfig) -> Result<DisplaySnapshot, TimerError> {
        config.validate()?;
        self.config = config;

        if self.state.running {
            debug!("Configuration stored for next start: {:?}", config);
        } else {
            self.session = config;
            self.state = TimerState::idle(&config);
            debug!("Configuration applied: {:?}", config);
        }

        Ok(self.snapshot())
    }

    /// Begin a session from the current configuration.
    ///
    /// Returns the session generation, which changes on every start so a
    /// stale tick loop can tell it has been superseded.
    pub fn start(&mut self) -> Result<u64, TimerError> {
        if self.state.running {
            return Err(TimerError::AlreadyRunning);
        }

        self.session = self.config;
        self.state = TimerState::started(&self.session);
        self.generation += 1;

        info!(
            "Timer started: {:?} from {}s, next horn at {}s",
            self.session.direction, self.state.elapsed_seconds, self.state.next_alert_at
        );
        Ok(self.generation)
    }

    /// Advance the clock by one second
    pub fn tick(&mut self) -> Result<TickOutcome, TimerError> {
        if !self.state.running {
            return Err(TimerError::NotRunning);
        }

        // A session that starts out of range (offset past the total) ends
        // without ever showing or sounding anything
        if !self.session.in_range(self.state.elapsed_seconds) {
            return Ok(TickOutcome {
                snapshot: self.stop(),
                alerts: Vec::new(),
                finished: true,
            });
        }

        let snapshot = self.snapshot();
        let mut alerts = Vec::new();
        let total = self.session.total_seconds();

        if self.session.direction == Direction::Down
            && !self.state.ten_minute_alert_fired
            && self.state.elapsed_seconds <= total - TEN_MINUTES
        {
            alerts.push(AlertEvent::new(AlertReason::TenMinuteMark));
            self.state.ten_minute_alert_fired = true;
        }

        // Compared the same way in both directions; a countdown moves away
        // from the boundary so this never fires after a fresh start
        if self.state.elapsed_seconds >= self.state.next_alert_at {
            alerts.push(AlertEvent::new(AlertReason::Interval));
            self.state.next_alert_at += self.session.interval();
        }

        self.state.elapsed_seconds += match self.session.direction {
            Direction::Up => 1,
            Direction::Down => -1,
        };

        let finished = !self.session.in_range(self.state.elapsed_seconds);
        if finished {
            info!("Timer reached the end of the period");
            self.stop();
        }

        Ok(TickOutcome {
            snapshot,
            alerts,
            finished,
        })
    }

    /// Stop the clock and return the idle display. Safe to repeat.
    pub fn stop(&mut self) -> DisplaySnapshot {
        if self.state.running {
            info!("Timer stopped at {}s", self.state.elapsed_seconds);
        }
        self.state.running = false;
        self.state.elapsed_seconds = 0;
        self.session = self.config;
        self.snapshot()
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot::new(
            self.state.running,
            self.state.elapsed_seconds,
            self.session.total_seconds(),
            self.state.next_alert_at,
        )
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// True while the session started as `generation` is still live
    pub fn is_session(&self, generation: u64) -> bool {
        self.state.running && self.generation == generation
    }

    /// Generation of the most recent `start`
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Configuration the next `start` will use
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Configuration the clock currently reflects
    pub fn session_config(&self) -> &TimerConfig {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(offset: u32, interval: u32, total: u32, direction: Direction) -> TimerEngine {
        TimerEngine::new(TimerConfig::new(offset, interval, total, direction)).unwrap()
    }

    fn count(alerts: &[AlertEvent], reason: AlertReason) -> usize {
        alerts.iter().filter(|a| a.reason == reason).count()
    }

    #[test]
    fn start_positions_clock_from_offset() {
        let mut down = engine(10, 120, 24, Direction::Down);
        down.start().unwrap();
        assert_eq!(down.state().elapsed_seconds, 1430);
        assert_eq!(down.state().next_alert_at, 1440);
        assert!(!down.state().ten_minute_alert_fired);

        let mut up = engine(250, 120, 24, Direction::Up);
        up.start().unwrap();
        assert_eq!(up.state().elapsed_seconds, 250);
        assert_eq!(up.state().next_alert_at, 360);
    }

    #[test]
    fn next_alert_is_next_multiple_after_start() {
        for offset in [0, 1, 59, 60, 119, 120, 121, 1439] {
            for direction in [Direction::Up, Direction::Down] {
                let mut e = engine(offset, 60, 24, direction);
                e.start().unwrap();
                let s = e.state();
                assert!(s.next_alert_at > s.elapsed_seconds);
                assert_eq!(s.next_alert_at % 60, 0);
                assert_eq!(s.next_alert_at, (s.elapsed_seconds / 60 + 1) * 60);
            }
        }
    }

    #[test]
    fn first_countdown_tick_without_boundary_is_silent() {
        let mut e = engine(10, 120, 24, Direction::Down);
        e.start().unwrap();

        let outcome = e.tick().unwrap();
        assert_eq!(outcome.snapshot.primary, "23:50/24:00");
        assert!(outcome.alerts.is_empty());
        assert!(!outcome.finished);
        assert_eq!(e.state().elapsed_seconds, 1429);
    }

    #[test]
    fn boundary_comparison_is_inclusive() {
        // Up from offset 120 with interval 60: start sits exactly on 120,
        // next boundary is 180; reach it and the horn fires on that tick
        let mut e = engine(120, 60, 24, Direction::Up);
        e.start().unwrap();
        for _ in 0..60 {
            assert!(e.tick().unwrap().alerts.is_empty());
        }
        assert_eq!(e.state().elapsed_seconds, 180);
        let outcome = e.tick().unwrap();
        assert_eq!(count(&outcome.alerts, AlertReason::Interval), 1);
        assert_eq!(e.state().next_alert_at, 240);
    }

    #[test]
    fn countdown_from_zero_offset_first_tick() {
        let mut e = engine(0, 120, 24, Direction::Down);
        e.start().unwrap();
        assert_eq!(e.state().elapsed_seconds, 1440);
        assert_eq!(e.state().next_alert_at, 1560);

        // 1440 < 1560 and 1440 > 840, so neither horn is due yet
        let outcome = e.tick().unwrap();
        assert!(outcome.alerts.is_empty());
        assert_eq!(outcome.snapshot.primary, "24:00/24:00");
        assert_eq!(outcome.snapshot.secondary, "Next Horn Sound at: --:--");
    }

    #[test]
    fn ten_minute_horn_is_inclusive() {
        // Starts exactly on total - 600
        let mut e = engine(840, 120, 24, Direction::Down);
        e.start().unwrap();
        assert_eq!(e.state().elapsed_seconds, 600);
        let outcome = e.tick().unwrap();
        assert_eq!(count(&outcome.alerts, AlertReason::TenMinuteMark), 1);
        assert!(e.state().ten_minute_alert_fired);
    }

    #[test]
    fn ten_minute_horn_fires_once_and_resets_on_restart() {
        let mut e = engine(0, 120, 12, Direction::Down);
        e.start().unwrap();

        let mut fired_at = Vec::new();
        while e.is_running() {
            let before = e.state().elapsed_seconds;
            let outcome = e.tick().unwrap();
            if count(&outcome.alerts, AlertReason::TenMinuteMark) > 0 {
                fired_at.push(before);
            }
        }
        assert_eq!(fired_at, vec![120]);

        e.start().unwrap();
        assert!(!e.state().ten_minute_alert_fired);
        let mut again = 0;
        while e.is_running() {
            again += count(&e.tick().unwrap().alerts, AlertReason::TenMinuteMark);
        }
        assert_eq!(again, 1);
    }

    #[test]
    fn countdown_never_reaches_interval_boundary() {
        // The interval comparison is the same in both directions, so on a
        // countdown a horn can only fire when the start sits on or above the
        // next boundary, which the start projection never produces
        let mut e = engine(0, 60, 5, Direction::Down);
        e.start().unwrap();
        let mut interval_horns = 0;
        while e.is_running() {
            interval_horns += count(&e.tick().unwrap().alerts, AlertReason::Interval);
        }
        assert_eq!(interval_horns, 0);
    }

    #[test]
    fn both_horns_can_fire_on_the_same_tick() {
        let mut e = engine(600, 60, 20, Direction::Down);
        e.start().unwrap();
        // Put the clock on an interval boundary inside the ten-minute window
        e.state.next_alert_at = e.state.elapsed_seconds;
        let outcome = e.tick().unwrap();
        assert_eq!(outcome.alerts.len(), 2);
        assert_eq!(outcome.alerts[0].reason, AlertReason::TenMinuteMark);
        assert_eq!(outcome.alerts[1].reason, AlertReason::Interval);
    }

    #[test]
    fn count_up_interval_horns_every_interval() {
        let mut e = engine(0, 60, 3, Direction::Up);
        e.start().unwrap();
        let mut horns_at = Vec::new();
        while e.is_running() {
            let before = e.state().elapsed_seconds;
            if !e.tick().unwrap().alerts.is_empty() {
                horns_at.push(before);
            }
        }
        assert_eq!(horns_at, vec![60, 120, 180]);
    }

    #[test]
    fn ticks_move_by_exactly_one_until_self_stop() {
        for direction in [Direction::Up, Direction::Down] {
            let mut e = engine(30, 60, 1, direction);
            e.start().unwrap();
            let step = if direction == Direction::Up { 1 } else { -1 };
            let mut ticks = 0;
            loop {
                let before = e.state().elapsed_seconds;
                let outcome = e.tick().unwrap();
                ticks += 1;
                if outcome.finished {
                    break;
                }
                assert_eq!(e.state().elapsed_seconds - before, step);
            }
            // 30..=60 up or 30..=0 down
            assert_eq!(ticks, 31);
            assert!(!e.is_running());
        }
    }

    #[test]
    fn count_up_completion_shows_full_period() {
        let mut e = engine(58, 60, 1, Direction::Up);
        e.start().unwrap();

        assert!(!e.tick().unwrap().finished);
        assert!(!e.tick().unwrap().finished);
        let last = e.tick().unwrap();
        assert!(last.finished);
        assert_eq!(last.snapshot.primary, "01:00/01:00");
        assert!(!e.is_running());
        assert_eq!(e.snapshot().primary, "00:00/01:00");
    }

    #[test]
    fn tick_while_stopped_is_rejected_without_change() {
        let mut e = engine(10, 120, 24, Direction::Down);
        let before = e.state().clone();
        assert_eq!(e.tick(), Err(TimerError::NotRunning));
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn start_while_running_is_rejected_without_change() {
        let mut e = engine(10, 120, 24, Direction::Down);
        let generation = e.start().unwrap();
        e.tick().unwrap();
        let before = e.state().clone();
        assert_eq!(e.start(), Err(TimerError::AlreadyRunning));
        assert_eq!(e.state(), &before);
        assert!(e.is_session(generation));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut e = engine(10, 120, 24, Direction::Down);
        e.start().unwrap();
        e.tick().unwrap();
        let first = e.stop();
        let second = e.stop();
        assert_eq!(first, second);
        assert_eq!(first.primary, "00:00/24:00");
        assert!(!first.running);
    }

    #[test]
    fn configure_while_stopped_reprojects_idle_state() {
        let mut e = engine(10, 120, 24, Direction::Down);
        e.start().unwrap();
        while e.is_running() {
            e.tick().unwrap();
        }
        assert!(e.state().ten_minute_alert_fired);

        let snapshot = e
            .configure(TimerConfig::new(30, 60, 20, Direction::Up))
            .unwrap();
        assert_eq!(snapshot.primary, "00:30/20:00");
        assert_eq!(snapshot.secondary, "Next Horn Sound at: 01:00");
        assert_eq!(e.state().next_alert_at, 60);
        assert!(!e.state().ten_minute_alert_fired);
    }

    #[test]
    fn configure_while_running_applies_on_next_start() {
        let mut e = engine(10, 120, 24, Direction::Down);
        let generation = e.start().unwrap();
        e.tick().unwrap();

        let snapshot = e
            .configure(TimerConfig::new(0, 60, 15, Direction::Up))
            .unwrap();
        assert!(snapshot.running);
        assert_eq!(snapshot.primary, "23:49/24:00");
        assert_eq!(e.session_config().total_minutes, 24);
        assert_eq!(e.config().total_minutes, 15);

        let outcome = e.tick().unwrap();
        assert_eq!(outcome.snapshot.primary, "23:49/24:00");
        assert_eq!(e.state().elapsed_seconds, 1428);
        assert!(e.is_session(generation));

        e.stop();
        let next = e.start().unwrap();
        assert_ne!(next, generation);
        assert!(!e.is_session(generation));
        assert_eq!(e.state().elapsed_seconds, 0);
        assert_eq!(e.snapshot().primary, "00:00/15:00");
    }

    #[test]
    fn invalid_configuration_leaves_state_untouched() {
        let mut e = engine(10, 120, 24, Direction::Down);
        let before = e.state().clone();
        let err = e
            .configure(TimerConfig::new(10, 0, 24, Direction::Down))
            .unwrap_err();
        assert!(matches!(err, TimerError::InvalidConfig { .. }));
        assert_eq!(e.state(), &before);
        assert_eq!(e.config().interval_seconds, 120);
    }

    #[test]
    fn offset_past_total_ends_on_first_tick() {
        let mut e = engine(90, 60, 1, Direction::Down);
        e.start().unwrap();
        assert_eq!(e.state().elapsed_seconds, -30);
        let outcome = e.tick().unwrap();
        assert!(outcome.finished);
        assert!(outcome.alerts.is_empty());
        assert!(!e.is_running());
    }
}
