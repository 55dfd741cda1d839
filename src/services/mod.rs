//! External collaborators
//!
//! This module contains the horn playback service used by the host.

pub mod horn;

// Re-export main functions
pub use horn::*;
