//! # Grid Reconstruction
//!
//! This module reads the flat table back and pivots one sample's rows into
//! two latitude x longitude grids (modeled and observed warming).
//!
//! The table is sorted by (Latitude, Longitude) right after loading, so
//! reconstruction is deterministic regardless of the row order on disk.
//! Pivoting requires every (latitude, longitude) pair to appear exactly
//! once for the selected sample; a duplicated pair fails loudly rather
//! than being averaged or overwritten.

use crate::flatten::{COL_HIST_TRD_MODEL, COL_HIST_TRD_OBS, COL_LATITUDE, COL_LONGITUDE, COL_SAMPLE_ID};
use log::debug;
use ndarray::Array2;
use polars::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while pivoting the flat table
#[derive(Error, Debug)]
pub enum PivotError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Null value in column '{column}' at row {row}")]
    NullValue { column: &'static str, row: usize },

    #[error(
        "Duplicate (latitude, longitude) pair ({lat}, {lon}) for sample {sample_id}; refusing to aggregate"
    )]
    DuplicateCell { sample_id: i64, lat: f64, lon: f64 },

    #[error("No value for (latitude, longitude) pair ({lat}, {lon}) for sample {sample_id}")]
    MissingCell { sample_id: i64, lat: f64, lon: f64 },
}

/// One sample's reconstructed warming grids.
///
/// `lat` and `lon` are the sorted unique coordinates; `modeled` and
/// `observed` are indexed by (latitude, longitude) in that order, both
/// axes ascending.
#[derive(Debug, Clone)]
pub struct SampleGrids {
    pub sample_id: i64,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub modeled: Array2<f64>,
    pub observed: Array2<f64>,
}

/// Loads the flat table from a CSV file and sorts it by (Latitude, Longitude).
pub fn load_table(path: &str) -> Result<DataFrame, Box<dyn std::error::Error>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()?;
    debug!("Loaded table {} with shape {:?}", path, df.shape());

    let sorted = df.sort([COL_LATITUDE, COL_LONGITUDE], SortMultipleOptions::default())?;
    Ok(sorted)
}

/// Reconstructs the modeled and observed grids for one sample.
///
/// Returns `Ok(None)` when the table has no rows for `sample_id`; the
/// caller treats that as "nothing to plot", not a failure.
pub fn sample_grids(df: &DataFrame, sample_id: i64) -> Result<Option<SampleGrids>, PivotError> {
    let ids = df.column(COL_SAMPLE_ID)?.i64()?;
    let mask = ids.equal(sample_id);
    let sample_rows = df.filter(&mask)?;
    if sample_rows.height() == 0 {
        return Ok(None);
    }

    let lat_col = sample_rows.column(COL_LATITUDE)?.f64()?;
    let lon_col = sample_rows.column(COL_LONGITUDE)?.f64()?;
    let model_col = sample_rows.column(COL_HIST_TRD_MODEL)?.f64()?;
    let obs_col = sample_rows.column(COL_HIST_TRD_OBS)?.f64()?;

    let lat = sorted_unique(lat_col, COL_LATITUDE)?;
    let lon = sorted_unique(lon_col, COL_LONGITUDE)?;

    let mut modeled = Array2::from_elem((lat.len(), lon.len()), f64::NAN);
    let mut observed = Array2::from_elem((lat.len(), lon.len()), f64::NAN);
    let mut seen = Array2::from_elem((lat.len(), lon.len()), false);

    for row in 0..sample_rows.height() {
        let latitude = value_at(lat_col, COL_LATITUDE, row)?;
        let longitude = value_at(lon_col, COL_LONGITUDE, row)?;

        // Exact lookup: the axes were built from these same values.
        let r = lat
            .binary_search_by(|probe| probe.total_cmp(&latitude))
            .map_err(|_| PivotError::MissingCell {
                sample_id,
                lat: latitude,
                lon: longitude,
            })?;
        let c = lon
            .binary_search_by(|probe| probe.total_cmp(&longitude))
            .map_err(|_| PivotError::MissingCell {
                sample_id,
                lat: latitude,
                lon: longitude,
            })?;

        if seen[[r, c]] {
            return Err(PivotError::DuplicateCell {
                sample_id,
                lat: latitude,
                lon: longitude,
            });
        }
        seen[[r, c]] = true;
        modeled[[r, c]] = value_at(model_col, COL_HIST_TRD_MODEL, row)?;
        observed[[r, c]] = value_at(obs_col, COL_HIST_TRD_OBS, row)?;
    }

    for (r, &latitude) in lat.iter().enumerate() {
        for (c, &longitude) in lon.iter().enumerate() {
            if !seen[[r, c]] {
                return Err(PivotError::MissingCell {
                    sample_id,
                    lat: latitude,
                    lon: longitude,
                });
            }
        }
    }

    Ok(Some(SampleGrids {
        sample_id,
        lat,
        lon,
        modeled,
        observed,
    }))
}

fn sorted_unique(col: &Float64Chunked, name: &'static str) -> Result<Vec<f64>, PivotError> {
    let mut values = Vec::with_capacity(col.len());
    for (row, value) in col.into_iter().enumerate() {
        values.push(value.ok_or(PivotError::NullValue { column: name, row })?);
    }
    values.sort_by(f64::total_cmp);
    values.dedup();
    Ok(values)
}

fn value_at(col: &Float64Chunked, name: &'static str, row: usize) -> Result<f64, PivotError> {
    col.get(row).ok_or(PivotError::NullValue { column: name, row })
}
