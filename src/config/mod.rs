//! Configuration module - environment variable parsing

use std::env;

/// Session configuration loaded from environment variables.
/// Everything has a default so the headless runner works out of the box.
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Seed for the simulation RNG (pellet spread, debris)
    pub seed: u64,
    /// Hard stop for the headless session in seconds (0 = run until game over)
    pub session_limit_secs: u64,
    /// Emit a JSON world snapshot every N ticks (0 = never)
    pub snapshot_every_ticks: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let seed = match env::var("ARENA_SEED") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("ARENA_SEED"))?,
            Err(_) => 0xA12E4A,
        };

        let session_limit_secs = match env::var("SESSION_LIMIT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("SESSION_LIMIT_SECS"))?,
            Err(_) => 120,
        };

        let snapshot_every_ticks = match env::var("SNAPSHOT_EVERY_TICKS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("SNAPSHOT_EVERY_TICKS"))?,
            Err(_) => crate::util::time::SIMULATION_TPS / crate::util::time::SNAPSHOT_TPS,
        };

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            seed,
            session_limit_secs,
            snapshot_every_ticks,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
