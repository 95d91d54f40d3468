//! # warmview
//!
//! A Rust library for flattening gridded GSAT warming datasets (NetCDF)
//! into CSV tables and rendering per-sample heatmap comparisons.
//!
//! ## Features
//!
//! - **Cross-join flattening**: one row per (sample, latitude, longitude)
//!   combination, with lower-rank variables broadcast across the added
//!   dimensions
//! - **Fail-fast validation**: array extents are checked against the axis
//!   lengths before any row is produced
//! - **Grid reconstruction**: per-sample pivot of the flat table back into
//!   latitude x longitude grids, with loud failure on duplicated cells
//! - **Three-panel figures**: modeled, observed, and difference heatmaps
//!   with shared color scales, shown interactively or rendered to PNG
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use warmview::input::{FlattenConfig, PlotConfig};
//! use warmview::{process_flatten_job, process_plot_job};
//!
//! let flatten = FlattenConfig {
//!     nc_key: "data.nc".to_string(),
//!     csv_key: "output.csv".to_string(),
//! };
//! process_flatten_job(&flatten)?;
//!
//! let plot = PlotConfig {
//!     csv_key: "output.csv".to_string(),
//!     sample_id: 42,
//!     png_key: Some("sample_42.png".to_string()),
//!     width: 2000,
//!     height: 600,
//! };
//! process_plot_job(&plot)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod dataset;
pub mod figure;
pub mod flatten;
pub mod grids;
pub mod info;
pub mod input;
pub mod log;
pub mod output;


use crate::dataset::WarmingFields;
use crate::figure::WarmingFigure;
use crate::flatten::flatten_to_dataframe;
use crate::grids::{load_table, sample_grids};
use crate::input::{FlattenConfig, PlotConfig};
use crate::log::show_netcdf_file_info;
use crate::output::write_dataframe_to_csv;
use ::log::info;

/// Flattens a gridded dataset according to the provided job configuration.
///
/// This function orchestrates the whole conversion:
/// 1. Opens the NetCDF file
/// 2. Loads the five named variables and validates their shapes
/// 3. Cross-joins the axes into the flat table
/// 4. Writes the table to the CSV destination
///
/// Any failure aborts the run; there is no partial-success mode.
///
/// # Errors
///
/// This function will return an error if:
/// - The NetCDF file cannot be opened
/// - A named variable is missing or has an unexpected rank or shape
/// - The output CSV file cannot be written
pub fn process_flatten_job(config: &FlattenConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file = netcdf::open(&config.nc_key)?;
    show_netcdf_file_info(&file)?;
    let fields = WarmingFields::from_file(&file)?;
    file.close()?;

    let df = flatten_to_dataframe(&fields)?;
    write_dataframe_to_csv(&df, &config.csv_key)?;
    info!(
        "Flattened {} rows into {}",
        fields.flat_row_count(),
        config.csv_key
    );

    Ok(())
}

/// Loads and validates the dataset without writing anything.
///
/// Used by the CLI's dry-run mode; reports the axis lengths and the row
/// count the flat table would have.
pub fn validate_flatten_job(config: &FlattenConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file = netcdf::open(&config.nc_key)?;
    show_netcdf_file_info(&file)?;
    let fields = WarmingFields::from_file(&file)?;
    file.close()?;

    println!(
        "\nDataset is valid: {} samples x {} lat x {} lon -> {} flat rows",
        fields.n_samples(),
        fields.n_lat(),
        fields.n_lon(),
        fields.flat_row_count()
    );
    Ok(())
}

/// Renders one sample's warming comparison according to the provided job
/// configuration.
///
/// Loads the flat table, reconstructs the sample's grids, and either shows
/// the figure interactively (blocking until the viewer is dismissed) or
/// renders it to a PNG file. An unknown sample id is reported and nothing
/// is rendered; that is the one expected, handled failure path.
///
/// # Errors
///
/// This function will return an error if:
/// - The CSV table cannot be read or lacks the expected columns
/// - The sample's rows contain a duplicated (latitude, longitude) pair
/// - gnuplot cannot be launched
pub fn process_plot_job(config: &PlotConfig) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_table(&config.csv_key)?;

    let Some(grids) = sample_grids(&table, config.sample_id)? else {
        println!("Sample ID {} not found in the dataset.", config.sample_id);
        return Ok(());
    };

    let figure = WarmingFigure::new(grids);
    match &config.png_key {
        Some(path) => {
            figure.save_png(path, config.width, config.height)?;
            info!("Wrote figure to {}", path);
        }
        None => figure.show()?,
    }
    Ok(())
}
