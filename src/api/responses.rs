//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{DisplaySnapshot, TimerConfig};

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub display: DisplaySnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, display: DisplaySnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            display,
        }
    }

    /// Create a running response
    pub fn running(message: String, display: DisplaySnapshot) -> Self {
        Self::new("running".to_string(), message, display)
    }

    /// Create a stopped response
    pub fn stopped(message: String, display: DisplaySnapshot) -> Self {
        Self::new("stopped".to_string(), message, display)
    }

    /// Create a response reflecting whether the clock is running
    pub fn for_display(message: String, display: DisplaySnapshot) -> Self {
        if display.running {
            Self::running(message, display)
        } else {
            Self::stopped(message, display)
        }
    }

    /// Create an error response
    pub fn error(message: String, display: DisplaySnapshot) -> Self {
        Self::new("error".to_string(), message, display)
    }
}

/// Full timer status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub display: DisplaySnapshot,
    pub running: bool,
    /// Configuration the clock currently reflects
    pub active_config: TimerConfig,
    /// Configuration the next start will use
    pub pending_config: TimerConfig,
    pub notices: Vec<String>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
