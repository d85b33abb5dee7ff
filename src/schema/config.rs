//! Configuration types for Game of Life simulation parameters.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compute::GridError;

/// Default tick interval in milliseconds.
fn default_tick_interval_ms() -> u64 {
    100
}

fn default_start_paused() -> bool {
    true
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid width in cells (X dimension).
    pub width: usize,
    /// Grid height in cells (Y dimension).
    pub height: usize,
    /// Delay between generations while the driver is running.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Whether the tick driver begins suspended.
    #[serde(default = "default_start_paused")]
    pub start_paused: bool,
    /// Use the rayon-backed advance on native targets.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            tick_interval_ms: default_tick_interval_ms(),
            start_paused: default_start_paused(),
            parallel: false,
        }
    }
}

impl SimulationConfig {
    /// Get total grid size (width * height).
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.width * self.height
    }

    /// Tick interval as a `Duration`.
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 || self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        Ok(())
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions {width}x{height} must be non-zero with an addressable cell count")]
    InvalidDimensions { width: usize, height: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("Tick interval must be positive")]
    InvalidTickInterval,
    #[error("Noise density {0} must lie in [0, 1]")]
    InvalidDensity(f64),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
