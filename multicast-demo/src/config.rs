//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main demo configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub arithmetic: ArithmeticConfig,
    #[serde(default)]
    pub book: BookConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Operands for the arithmetic scenario
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArithmeticConfig {
    #[serde(default = "default_x")]
    pub x: f64,
    #[serde(default = "default_y")]
    pub y: f64,
    /// Value returned when the handler chain is empty
    #[serde(default)]
    pub default_result: f64,
}

fn default_x() -> f64 {
    60.0
}

fn default_y() -> f64 {
    12.0
}

impl Default for ArithmeticConfig {
    fn default() -> Self {
        Self {
            x: default_x(),
            y: default_y(),
            default_result: 0.0,
        }
    }
}

/// Initial and updated values for the book scenario
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BookConfig {
    pub name: String,
    pub price: f64,
    pub rename_to: String,
    pub reprice_to: f64,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            name: "NodeJS".to_string(),
            price: 40.0,
            rename_to: "AngularJS".to_string(),
            reprice_to: 43.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Txt,
    Json,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<DemoConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: DemoConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
