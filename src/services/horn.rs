//! Horn playback through an external audio player

use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::HornError;

/// Where the horn sound lives and what plays it
#[derive(Debug, Clone)]
pub struct HornSettings {
    pub sound_file: PathBuf,
    /// Player executable, invoked as `<player> <sound_file>`
    pub player: String,
}

impl HornSettings {
    pub fn new(sound_file: impl Into<PathBuf>, player: impl Into<String>) -> Self {
        Self {
            sound_file: sound_file.into(),
            player: player.into(),
        }
    }
}

impl Default for HornSettings {
    fn default() -> Self {
        Self::new("horn.wav", "aplay")
    }
}

/// Play the horn once and wait for the player to exit
pub async fn play_horn(settings: &HornSettings) -> Result<(), HornError> {
    if !tokio::fs::try_exists(&settings.sound_file).await.unwrap_or(false) {
        return Err(HornError::MissingAsset {
            path: settings.sound_file.clone(),
        });
    }

    debug!("Playing {} with {}", settings.sound_file.display(), settings.player);

    let output = Command::new(&settings.player)
        .arg(&settings.sound_file)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| HornError::PlayerUnavailable {
            player: settings.player.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(HornError::PlaybackFailed {
            player: settings.player.clone(),
            stderr,
        });
    }

    info!("Horn played");
    Ok(())
}

/// Check whether the configured horn sound file exists
pub async fn check_horn_asset(settings: &HornSettings) -> Result<(), HornError> {
    if tokio::fs::try_exists(&settings.sound_file).await.unwrap_or(false) {
        info!("Horn sound found at {}", settings.sound_file.display());
        Ok(())
    } else {
        Err(HornError::MissingAsset {
            path: settings.sound_file.clone(),
        })
    }
}
