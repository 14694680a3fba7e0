//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub pack: PackConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_true")]
    pub uppercase_hex: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            uppercase_hex: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Range policy applied by the `pack` command after packing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackConfig {
    /// Run the range check and warn about out-of-range signals
    #[serde(default = "default_true")]
    pub check_range: bool,
    /// Refuse to print a frame that fails the range check
    #[serde(default)]
    pub strict: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            check_range: true,
            strict: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if config.pack.strict && !config.pack.check_range {
        log::warn!("pack.strict has no effect while pack.check_range is false");
    }

    Ok(config)
}
