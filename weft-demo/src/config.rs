//! Optional file-backed demo configuration.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings read from `weft-demo.toml`, all optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of items generated at startup.
    pub initial_items: usize,
    /// Column count for the column layout mode.
    pub columns: usize,
    /// Spacing between cells, in terminal cells.
    pub spacing: f64,
    /// Whether structural updates animate.
    pub animate: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            initial_items: 24,
            columns: 5,
            spacing: 2.0,
            animate: true,
        }
    }
}

impl DemoConfig {
    /// Load the config file, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}
