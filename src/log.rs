use crate::input::{FlattenConfig, PlotConfig};
use std::time::Duration;

pub fn show_greeting() {
    println!("=== GSAT Warming Flatten & Visualize ===");
}

pub fn flatten_config_echo(config: &FlattenConfig) {
    println!("\nConfiguration:");
    println!("  Input NetCDF: {}", config.nc_key);
    println!("  Output CSV: {}", config.csv_key);
}

pub fn plot_config_echo(config: &PlotConfig) {
    println!("\nConfiguration:");
    println!("  Input CSV: {}", config.csv_key);
    println!("  Sample ID: {}", config.sample_id);
    match &config.png_key {
        Some(path) => println!("  Output PNG: {} ({}x{})", path, config.width, config.height),
        None => println!("  Output: interactive viewer"),
    }
}

pub fn show_netcdf_file_info(file: &netcdf::File) -> Result<(), Box<dyn std::error::Error>> {
    println!("\nNetCDF File Info:");
    println!("Dimensions:");
    for dim in file.dimensions() {
        println!("  {}: {}", dim.name(), dim.len());
    }
    println!("Variables:");
    for var in file.variables() {
        let dims: Vec<String> = var.dimensions().iter().map(|d| d.name().to_string()).collect();
        println!("  {}: {:?}", var.name(), dims);
    }
    Ok(())
}

pub fn show_farewell_with_timing(elapsed: Duration) {
    println!("\n=== Completed successfully in {:.2}s ===", elapsed.as_secs_f64());
}
