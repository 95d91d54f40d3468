//! # CSV Output Module
//!
//! This module writes the flattened DataFrame to a delimited text file.
//! The header row carries the eight fixed field names; numeric values keep
//! their native precision (shortest round-trip formatting, no rounding),
//! and no index column is emitted.

use log::debug;
use polars::prelude::*;
use std::fs::File;

/// Writes a DataFrame to a CSV file.
///
/// An existing file at `output_path` is overwritten unconditionally.
///
/// # Errors
///
/// Returns an error if the output path is not writable or serialization
/// fails; nothing is retained at the output path beyond what the
/// filesystem already truncated.
pub fn write_dataframe_to_csv(
    df: &DataFrame,
    output_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!("Writing DataFrame to CSV file: {}", output_path);
    debug!("DataFrame shape: {:?}", df.shape());
    debug!("DataFrame schema:\n{:?}", df.schema());
    debug!("First few rows:\n{}", df.head(Some(5)));

    let file = File::create(output_path)?;
    let mut df_clone = df.clone();
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut df_clone)?;

    debug!("Successfully wrote CSV file: {}", output_path);
    Ok(())
}
