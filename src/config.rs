//! Runtime configuration.
//!
//! Policy knobs only: the character alphabets and the 64-character
//! length cap are fixed contracts, not configuration.

use crate::strength::DEFAULT_GUESSES_PER_SECOND;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Assumed attacker guessing rate for crack-time estimates.
    pub guesses_per_second: f64,
    /// How long the copied indicator stays visible, in milliseconds.
    pub copied_ttl_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            guesses_per_second: DEFAULT_GUESSES_PER_SECOND,
            copied_ttl_ms: 2000,
        }
    }
}

impl EngineConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.guesses_per_second.is_finite() || self.guesses_per_second <= 0.0 {
            return Err(ConfigError::InvalidGuessRate);
        }
        if self.copied_ttl_ms == 0 {
            return Err(ConfigError::InvalidCopiedTtl);
        }
        Ok(())
    }
}

/// Demo driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Run until interrupted (true) or process a fixed number of ticks.
    pub continuous: bool,
    /// Number of ticks to process if not continuous.
    pub tick_count: u64,
    /// Metrics server port (0 to disable).
    pub metrics_port: u16,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            continuous: false,
            tick_count: 32,
            metrics_port: 9090,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The attacker rate must be a positive finite number.
    #[error("guesses per second must be a positive finite number")]
    InvalidGuessRate,
    /// The copied-indicator TTL must be nonzero.
    #[error("copied indicator ttl must be nonzero")]
    InvalidCopiedTtl,
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The configuration file could not be parsed.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Engine policy section.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Demo driver section.
    #[serde(default)]
    pub demo: DemoConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.engine.validate()?;
        Ok(config)
    }
}
