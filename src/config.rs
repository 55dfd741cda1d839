//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{
    services::HornSettings,
    state::{Direction, TimerConfig},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "horn-timer")]
#[command(about = "A period timer with interval horns and an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Starting offset in seconds
    #[arg(short, long, default_value = "10")]
    pub offset: u32,

    /// Seconds between interval horns
    #[arg(short, long, default_value = "120")]
    pub interval: u32,

    /// Period length in minutes
    #[arg(short, long, default_value = "24")]
    pub total: u32,

    /// Clock direction
    #[arg(short, long, value_enum, default_value = "down")]
    pub direction: Direction,

    /// Horn sound file
    #[arg(long, default_value = "horn.wav")]
    pub sound: PathBuf,

    /// Audio player command, invoked with the sound file as its argument
    #[arg(long, default_value = "aplay")]
    pub player: String,

    /// Do not print the clock to the terminal
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial timer parameters
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::new(self.offset, self.interval, self.total, self.direction)
    }

    pub fn horn_settings(&self) -> HornSettings {
        HornSettings::new(self.sound.clone(), self.player.clone())
    }
}
