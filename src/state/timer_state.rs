//! Timer configuration and the state record owned by the engine

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Seconds into a countdown after which the one-shot horn sounds
pub const TEN_MINUTES: i64 = 600;

/// Which way the clock runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Counts from the offset up to the total
    Up,
    /// Counts from the total minus the offset down to zero
    Down,
}

/// The four user-editable timer parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub offset_seconds: u32,
    pub interval_seconds: u32,
    pub total_minutes: u32,
    pub direction: Direction,
}

impl TimerConfig {
    pub fn new(offset_seconds: u32, interval_seconds: u32, total_minutes: u32, direction: Direction) -> Self {
        Self {
            offset_seconds,
            interval_seconds,
            total_minutes,
            direction,
        }
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<(), TimerError> {
        if self.interval_seconds == 0 {
            return Err(TimerError::InvalidConfig {
                field: "interval_seconds",
                reason: "must be greater than zero",
            });
        }
        if self.total_minutes == 0 {
            return Err(TimerError::InvalidConfig {
                field: "total_minutes",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    pub fn total_seconds(&self) -> i64 {
        i64::from(self.total_minutes) * 60
    }

    pub fn interval(&self) -> i64 {
        i64::from(self.interval_seconds)
    }

    /// Clock position a session starts from
    pub fn starting_elapsed(&self) -> i64 {
        match self.direction {
            Direction::Down => self.total_seconds() - i64::from(self.offset_seconds),
            Direction::Up => i64::from(self.offset_seconds),
        }
    }

    /// First interval boundary strictly after `elapsed`
    pub fn next_boundary_after(&self, elapsed: i64) -> i64 {
        let interval = self.interval();
        (elapsed.div_euclid(interval) + 1) * interval
    }

    /// Whether a session at `elapsed` should keep running
    pub fn in_range(&self, elapsed: i64) -> bool {
        match self.direction {
            Direction::Up => elapsed <= self.total_seconds(),
            Direction::Down => elapsed >= 0,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::new(10, 120, 24, Direction::Down)
    }
}

/// Mutable timer state, only ever touched by `TimerEngine`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub running: bool,
    pub elapsed_seconds: i64,
    pub next_alert_at: i64,
    pub ten_minute_alert_fired: bool,
}

impl TimerState {
    /// Project `config` onto a stopped clock
    pub fn idle(config: &TimerConfig) -> Self {
        let elapsed_seconds = config.starting_elapsed();
        Self {
            running: false,
            elapsed_seconds,
            next_alert_at: config.next_boundary_after(elapsed_seconds),
            ten_minute_alert_fired: false,
        }
    }

    /// Same projection as `idle`, with the clock running
    pub fn started(config: &TimerConfig) -> Self {
        Self {
            running: true,
            ..Self::idle(config)
        }
    }
}
