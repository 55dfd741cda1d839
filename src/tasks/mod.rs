//! Background tasks module
//!
//! This module contains the tasks that run alongside the HTTP server.

pub mod display;
pub mod horn_player;
pub mod timer_loop;

// Re-export main functions
pub use display::display_task;
pub use horn_player::horn_player_task;
pub use timer_loop::{timer_loop_task, TICK_PERIOD};
