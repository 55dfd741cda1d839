//! Display snapshots pushed to the host surface

use serde::{Deserialize, Serialize};

/// Rendered clock as the display surface shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub running: bool,
    pub elapsed_seconds: i64,
    pub total_seconds: i64,
    pub next_alert_at: i64,
    /// `MM:SS/TT:TT`
    pub primary: String,
    /// `Next Horn Sound at: MM:SS` or `--:--` past the end of the period
    pub secondary: String,
}

impl DisplaySnapshot {
    pub fn new(running: bool, elapsed_seconds: i64, total_seconds: i64, next_alert_at: i64) -> Self {
        let primary = format!(
            "{}/{}",
            format_clock(elapsed_seconds),
            format_clock(total_seconds)
        );
        let secondary = if next_alert_at > total_seconds {
            "Next Horn Sound at: --:--".to_string()
        } else {
            format!("Next Horn Sound at: {}", format_clock(next_alert_at))
        };

        Self {
            running,
            elapsed_seconds,
            total_seconds,
            next_alert_at,
            primary,
            secondary,
        }
    }
}

/// Format seconds as zero-padded `MM:SS`; minutes widen past 99
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.unsigned_abs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
