//! User-visible notices for non-fatal failures

use serde::{Deserialize, Serialize};

/// Oldest notices are dropped past this many
const MAX_NOTICES: usize = 20;

/// Notices shown to the user, e.g. horn playback failures
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notices {
    pub messages: Vec<String>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > MAX_NOTICES {
            let excess = self.messages.len() - MAX_NOTICES;
            self.messages.drain(..excess);
        }
    }

    /// Drop notices mentioning `component`
    pub fn clear_for(&mut self, component: &str) {
        let initial_count = self.messages.len();
        let component = component.to_lowercase();
        self.messages
            .retain(|message| !message.to_lowercase().contains(&component));

        if self.messages.len() != initial_count {
            tracing::info!(
                "Cleared {} notices for: {}",
                initial_count - self.messages.len(),
                component
            );
        }
    }
}
