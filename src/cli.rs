//! # CLI Module
//!
//! This module provides the command-line interface for warmview, including:
//! - Argument parsing with clap
//! - Configuration file loading (JSON/YAML) with CLI-over-config precedence
//! - Environment variable support with the WARMVIEW_ prefix
//! - Subcommands for flattening, plotting, file inspection, config
//!   templates, and shell completions

use crate::input::{
    DEFAULT_FIGURE_HEIGHT, DEFAULT_FIGURE_WIDTH, FlattenConfig, PlotConfig,
};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Flatten gridded GSAT warming datasets and visualize per-sample heatmaps
#[derive(Parser, Debug)]
#[command(name = "warmview")]
#[command(about = "Flatten gridded warming datasets to CSV and render heatmap comparisons")]
#[command(version)]
#[command(author = "Rogerio Alves <rjmalves@users.noreply.github.com>")]
#[command(long_about = "
warmview is a command-line tool for working with gridded GSAT warming datasets.
It flattens a NetCDF dataset into a CSV table with one row per
(sample, latitude, longitude) combination, and renders per-sample
modeled/observed/difference heatmaps from that table.

EXAMPLES:
  # Flatten a dataset
  warmview flatten data.nc output.csv

  # Render sample 42 interactively
  warmview plot output.csv --sample 42

  # Render to a PNG (headless)
  warmview plot output.csv --sample 42 -o sample_42.png

  # Inspect a NetCDF file
  warmview info data.nc --detailed

  # Using a config file
  warmview flatten --config flatten.json

  # Generate templates
  warmview template plot --format yaml > plot.yaml
")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file path (JSON or YAML)
    #[arg(short, long, global = true, env = "WARMVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten a gridded NetCDF dataset into a CSV table
    #[command(long_about = "
Flatten a gridded NetCDF warming dataset into a CSV table.

The dataset must expose the fixed variables lon, lat, sample_id,
GSAT_hist_trd_model, GSAT_hist_trd_obs and the three GSAT_delta_model_*
arrays. The output table has one row per (sample, latitude, longitude)
combination with lower-rank variables broadcast, and overwrites any
existing file at the output path.

EXAMPLES:
  # Basic flattening
  warmview flatten data.nc output.csv

  # Validate the dataset without writing
  warmview flatten data.nc output.csv --dry-run

  # Using a config file with overrides
  warmview flatten --config flatten.json
")]
    Flatten {
        /// Input NetCDF file path
        #[arg(value_name = "INPUT", env = "WARMVIEW_INPUT")]
        input: Option<String>,

        /// Output CSV file path
        #[arg(value_name = "OUTPUT", env = "WARMVIEW_OUTPUT")]
        output: Option<String>,

        /// Dry run - load and validate the dataset without writing
        #[arg(long, env = "WARMVIEW_DRY_RUN")]
        dry_run: bool,
    },

    /// Render a three-panel warming heatmap for one sample
    #[command(long_about = "
Render modeled warming, observed warming, and their difference for one
sample as three side-by-side heatmaps.

The modeled and observed panels share a color range spanning the union of
both fields so they are visually comparable; the difference panel uses its
own range. Without --output the figure opens in the interactive gnuplot
viewer and the command blocks until it is dismissed.

An unknown sample id is reported and nothing is rendered; this is not an
error.

EXAMPLES:
  # Interactive viewer
  warmview plot output.csv --sample 42

  # Headless PNG rendering
  warmview plot output.csv --sample 42 -o sample_42.png --width 2400 --height 800
")]
    Plot {
        /// Flat CSV table path
        #[arg(value_name = "TABLE", env = "WARMVIEW_TABLE")]
        table: Option<String>,

        /// Sample identifier to render
        #[arg(short, long, env = "WARMVIEW_SAMPLE")]
        sample: Option<i64>,

        /// Output PNG path (default: interactive viewer)
        #[arg(short, long, env = "WARMVIEW_PNG")]
        output: Option<String>,

        /// Figure width in pixels
        #[arg(long, env = "WARMVIEW_WIDTH")]
        width: Option<u32>,

        /// Figure height in pixels
        #[arg(long, env = "WARMVIEW_HEIGHT")]
        height: Option<u32>,
    },

    /// Show information about a NetCDF file
    #[command(long_about = "
Inspect NetCDF files and display structure information.

This command analyzes a NetCDF file and displays its dimensions, variables
and their attributes, and (with --detailed) global attributes.

EXAMPLES:
  # Basic file info
  warmview info data.nc

  # Detailed information
  warmview info data.nc --detailed

  # Info about a specific variable
  warmview info data.nc -n GSAT_hist_trd_model

  # JSON output for scripting
  warmview info data.nc --format json
")]
    Info {
        /// NetCDF file path
        file: String,

        /// Show detailed variable information
        #[arg(long)]
        detailed: bool,

        /// Show only specific variable info
        #[arg(short = 'n', long)]
        variable: Option<String>,

        /// Output format for file information
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },

    /// Generate configuration templates
    Template {
        /// Template type to generate
        #[arg(value_enum)]
        template_type: TemplateType,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration format
        #[arg(long, value_enum, default_value_t = ConfigFormat::Json)]
        format: ConfigFormat,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON structured output
    Json,
    /// YAML structured output
    Yaml,
}

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum TemplateType {
    /// Flattening job template
    Flatten,
    /// Plotting job template
    Plot,
}

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON configuration format
    Json,
    /// YAML configuration format
    Yaml,
}

/// Builds the effective flatten configuration from an optional config file
/// and CLI arguments. Explicit CLI arguments win over the file.
pub fn resolve_flatten_config(
    config_path: Option<&PathBuf>,
    input: Option<String>,
    output: Option<String>,
) -> Result<FlattenConfig, Box<dyn std::error::Error>> {
    let base = match config_path {
        Some(path) => Some(FlattenConfig::from_file(path)?),
        None => None,
    };

    let nc_key = input
        .or_else(|| base.as_ref().map(|c| c.nc_key.clone()))
        .ok_or("Missing input NetCDF path: pass INPUT or provide --config")?;
    let csv_key = output
        .or_else(|| base.as_ref().map(|c| c.csv_key.clone()))
        .ok_or("Missing output CSV path: pass OUTPUT or provide --config")?;

    Ok(FlattenConfig { nc_key, csv_key })
}

/// Builds the effective plot configuration from an optional config file and
/// CLI arguments. Explicit CLI arguments win over the file.
pub fn resolve_plot_config(
    config_path: Option<&PathBuf>,
    table: Option<String>,
    sample: Option<i64>,
    output: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<PlotConfig, Box<dyn std::error::Error>> {
    let base = match config_path {
        Some(path) => Some(PlotConfig::from_file(path)?),
        None => None,
    };

    let csv_key = table
        .or_else(|| base.as_ref().map(|c| c.csv_key.clone()))
        .ok_or("Missing table path: pass TABLE or provide --config")?;
    let sample_id = sample
        .or_else(|| base.as_ref().map(|c| c.sample_id))
        .ok_or("Missing sample id: pass --sample or provide --config")?;
    let png_key = output.or_else(|| base.as_ref().and_then(|c| c.png_key.clone()));
    let width = width
        .or_else(|| base.as_ref().map(|c| c.width))
        .unwrap_or(DEFAULT_FIGURE_WIDTH);
    let height = height
        .or_else(|| base.as_ref().map(|c| c.height))
        .unwrap_or(DEFAULT_FIGURE_HEIGHT);

    Ok(PlotConfig {
        csv_key,
        sample_id,
        png_key,
        width,
        height,
    })
}

/// Renders a configuration template in the requested format.
pub fn render_template(
    template_type: &TemplateType,
    format: &ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    match template_type {
        TemplateType::Flatten => {
            let config = FlattenConfig {
                nc_key: "data.nc".to_string(),
                csv_key: "output.csv".to_string(),
            };
            serialize_template(&config, format)
        }
        TemplateType::Plot => {
            let config = PlotConfig {
                csv_key: "output.csv".to_string(),
                sample_id: 1,
                png_key: Some("sample_1.png".to_string()),
                width: DEFAULT_FIGURE_WIDTH,
                height: DEFAULT_FIGURE_HEIGHT,
            };
            serialize_template(&config, format)
        }
    }
}

fn serialize_template<T: serde::Serialize>(
    config: &T,
    format: &ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let rendered = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_help() {
        let result = Cli::try_parse_from(["warmview", "--help"]);
        assert!(result.is_err()); // --help causes early exit with "error"

        let error = result.unwrap_err();
        assert!(error.to_string().contains("Flatten gridded warming datasets"));
    }

    #[test]
    fn test_cli_version() {
        let result = Cli::try_parse_from(["warmview", "--version"]);
        assert!(result.is_err()); // --version causes early exit
    }

    #[test]
    fn test_flatten_command_basic() {
        let cli = Cli::parse_from(["warmview", "flatten", "data.nc", "output.csv"]);

        if let Commands::Flatten { input, output, dry_run } = &cli.command {
            assert_eq!(input, &Some("data.nc".to_string()));
            assert_eq!(output, &Some("output.csv".to_string()));
            assert!(!dry_run);
        } else {
            panic!("Expected Flatten command");
        }
    }

    #[test]
    fn test_flatten_command_dry_run() {
        let cli = Cli::parse_from(["warmview", "flatten", "data.nc", "output.csv", "--dry-run"]);

        if let Commands::Flatten { dry_run, .. } = &cli.command {
            assert!(dry_run);
        } else {
            panic!("Expected Flatten command");
        }
    }

    #[test]
    fn test_plot_command() {
        let cli = Cli::parse_from([
            "warmview", "plot", "output.csv", "--sample", "42", "-o", "fig.png", "--width", "1200",
        ]);

        if let Commands::Plot { table, sample, output, width, height } = &cli.command {
            assert_eq!(table, &Some("output.csv".to_string()));
            assert_eq!(sample, &Some(42));
            assert_eq!(output, &Some("fig.png".to_string()));
            assert_eq!(width, &Some(1200));
            assert_eq!(height, &None);
        } else {
            panic!("Expected Plot command");
        }
    }

    #[test]
    fn test_info_command() {
        let cli = Cli::parse_from(["warmview", "info", "data.nc", "--detailed", "--format", "json"]);

        if let Commands::Info { file, detailed, format, .. } = &cli.command {
            assert_eq!(file, "data.nc");
            assert!(detailed);
            assert_eq!(format, &OutputFormat::Json);
        } else {
            panic!("Expected Info command");
        }
    }

    #[test]
    fn test_global_flags_conflict() {
        let result = Cli::try_parse_from(["warmview", "--verbose", "--quiet", "info", "data.nc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_flatten_config_requires_paths() {
        let result = resolve_flatten_config(None, Some("data.nc".to_string()), None);
        assert!(result.is_err());

        let config = resolve_flatten_config(
            None,
            Some("data.nc".to_string()),
            Some("output.csv".to_string()),
        )
        .unwrap();
        assert_eq!(config.nc_key, "data.nc");
        assert_eq!(config.csv_key, "output.csv");
    }

    #[test]
    fn test_resolve_plot_config_defaults() {
        let config = resolve_plot_config(
            None,
            Some("output.csv".to_string()),
            Some(7),
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(config.csv_key, "output.csv");
        assert_eq!(config.sample_id, 7);
        assert!(config.png_key.is_none());
        assert_eq!(config.width, DEFAULT_FIGURE_WIDTH);
        assert_eq!(config.height, DEFAULT_FIGURE_HEIGHT);
    }

    #[test]
    fn test_render_template_roundtrip() {
        let json = render_template(&TemplateType::Flatten, &ConfigFormat::Json).unwrap();
        let config = FlattenConfig::from_json(&json).unwrap();
        assert_eq!(config.nc_key, "data.nc");

        let yaml = render_template(&TemplateType::Plot, &ConfigFormat::Yaml).unwrap();
        let config = PlotConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config.sample_id, 1);
    }
}
