//! Horn Timer - A period timer with interval horns
//!
//! This library provides the timer engine that decides when the horn sounds,
//! along with the host pieces around it: shared state, background tasks, horn
//! playback and an HTTP control surface.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{HornError, TimerError};
pub use state::{AppState, Direction, TimerConfig, TimerEngine};
pub use utils::signals::shutdown_signal;
