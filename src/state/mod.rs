//! State management module
//!
//! This module contains the timer engine, its state record and the shared
//! host state built around it.

pub mod app_state;
pub mod display;
pub mod engine;
pub mod notices;
pub mod timer_state;

// Re-export main types
pub use app_state::{AlertReceiver, AppState};
pub use display::DisplaySnapshot;
pub use engine::{AlertEvent, AlertReason, TickOutcome, TimerEngine};
pub use notices::Notices;
pub use timer_state::{Direction, TimerConfig, TimerState};
