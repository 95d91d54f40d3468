//! # Input Configuration Module
//!
//! This module provides configuration parsing for warmview jobs. Job
//! configs can be loaded from JSON or YAML files (picked by extension) or
//! built programmatically; the CLI layer merges them with command-line
//! arguments.
//!
//! ## Configuration Structure
//!
//! - [`FlattenConfig`]: input NetCDF path and output CSV path.
//! - [`PlotConfig`]: flat table path, sample selector, and an optional PNG
//!   destination (absent means interactive display).
//!
//! ## Example Usage
//!
//! ```rust
//! use warmview::input::FlattenConfig;
//!
//! let json = r#"
//! {
//!   "nc_key": "data.nc",
//!   "csv_key": "output.csv"
//! }"#;
//! let config = FlattenConfig::from_json(json)?;
//! assert_eq!(config.nc_key, "data.nc");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default pixel width of a rendered figure.
pub const DEFAULT_FIGURE_WIDTH: u32 = 2000;
/// Default pixel height of a rendered figure.
pub const DEFAULT_FIGURE_HEIGHT: u32 = 600;

/// Configuration for a flattening job.
#[derive(Deserialize, Serialize, Clone)]
pub struct FlattenConfig {
    /// Path to the input NetCDF file
    pub nc_key: String,
    /// Path for the output CSV file
    pub csv_key: String,
}

/// Configuration for a plotting job.
#[derive(Deserialize, Serialize, Clone)]
pub struct PlotConfig {
    /// Path to the flat CSV table
    pub csv_key: String,
    /// Sample identifier to reconstruct and render
    pub sample_id: i64,
    /// Optional PNG destination; when absent the figure is shown
    /// interactively
    #[serde(default)]
    pub png_key: Option<String>,
    /// Pixel width of the rendered figure
    #[serde(default = "default_width")]
    pub width: u32,
    /// Pixel height of the rendered figure
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    DEFAULT_FIGURE_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_FIGURE_HEIGHT
}

impl FlattenConfig {
    /// Loads a flatten configuration from a JSON or YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        if is_yaml(path) {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Loads a flatten configuration from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: FlattenConfig = serde_json::from_str(json_str)?;
        Ok(config)
    }

    /// Loads a flatten configuration from a YAML string.
    pub fn from_yaml(yaml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: FlattenConfig = serde_yaml::from_str(yaml_str)?;
        Ok(config)
    }
}

impl PlotConfig {
    /// Loads a plot configuration from a JSON or YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        if is_yaml(path) {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Loads a plot configuration from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: PlotConfig = serde_json::from_str(json_str)?;
        Ok(config)
    }

    /// Loads a plot configuration from a YAML string.
    pub fn from_yaml(yaml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: PlotConfig = serde_yaml::from_str(yaml_str)?;
        Ok(config)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
