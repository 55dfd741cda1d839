//! Error types for the timer engine and horn playback

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by timer engine operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("timer is already running")]
    AlreadyRunning,

    #[error("timer is not running")]
    NotRunning,

    #[error("timer state unavailable: {0}")]
    StateUnavailable(String),
}

/// Errors raised while playing the horn sound. None of these are fatal.
#[derive(Debug, Error)]
pub enum HornError {
    #[error("horn sound file {path} not found")]
    MissingAsset { path: PathBuf },

    #[error("failed to launch audio player {player}")]
    PlayerUnavailable {
        player: String,
        #[source]
        source: std::io::Error,
    },

    #[error("audio player {player} failed: {stderr}")]
    PlaybackFailed { player: String, stderr: String },
}
