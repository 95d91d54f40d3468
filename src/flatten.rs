//! # Flattening Transform
//!
//! This module turns the loaded gridded arrays into a single denormalized
//! table with one row per (sample, latitude, longitude) combination.
//!
//! ## Row layout
//!
//! Each row carries the sample identifier, the coordinate pair, the rank-3
//! value at that exact index, the rank-2 observed value broadcast across
//! samples, and the three rank-1 deltas broadcast across the whole grid.
//! Row order is the nested iteration order: sample outer, latitude middle,
//! longitude inner, for a total of S x A x L rows.

use crate::dataset::WarmingFields;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use polars::prelude::*;

/// Sample identifier column.
pub const COL_SAMPLE_ID: &str = "Sample_ID";
/// Latitude coordinate column.
pub const COL_LATITUDE: &str = "Latitude";
/// Longitude coordinate column.
pub const COL_LONGITUDE: &str = "Longitude";
/// Modeled historical warming trend column.
pub const COL_HIST_TRD_MODEL: &str = "GSAT_hist_trd_model";
/// Observed historical warming trend column.
pub const COL_HIST_TRD_OBS: &str = "GSAT_hist_trd_obs";
/// Near-horizon warming delta column.
pub const COL_DELTA_NEAR: &str = "GSAT_delta_model_near";
/// Mid-horizon warming delta column.
pub const COL_DELTA_MID: &str = "GSAT_delta_model_mid";
/// Long-horizon warming delta column.
pub const COL_DELTA_LONG: &str = "GSAT_delta_model_long";

/// The eight flat-table columns, in header order.
pub const FLAT_COLUMNS: [&str; 8] = [
    COL_SAMPLE_ID,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_HIST_TRD_MODEL,
    COL_HIST_TRD_OBS,
    COL_DELTA_NEAR,
    COL_DELTA_MID,
    COL_DELTA_LONG,
];

/// Cross-joins the dataset's axes into a flat DataFrame.
///
/// The whole row set is materialized in memory before the frame is
/// assembled; at S x A x L rows of eight numeric fields this is the
/// documented scaling behavior, not an accident.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be assembled from the
/// generated columns.
pub fn flatten_to_dataframe(fields: &WarmingFields) -> Result<DataFrame, Box<dyn std::error::Error>> {
    let rows = fields.flat_row_count();
    debug!(
        "Flattening {} samples x {} lat x {} lon into {} rows",
        fields.n_samples(),
        fields.n_lat(),
        fields.n_lon(),
        rows
    );

    let mut sample_col: Vec<i64> = Vec::with_capacity(rows);
    let mut lat_col: Vec<f64> = Vec::with_capacity(rows);
    let mut lon_col: Vec<f64> = Vec::with_capacity(rows);
    let mut model_col: Vec<f64> = Vec::with_capacity(rows);
    let mut obs_col: Vec<f64> = Vec::with_capacity(rows);
    let mut near_col: Vec<f64> = Vec::with_capacity(rows);
    let mut mid_col: Vec<f64> = Vec::with_capacity(rows);
    let mut long_col: Vec<f64> = Vec::with_capacity(rows);

    let progress = ProgressBar::new(fields.n_samples() as u64);
    progress.set_style(ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} samples",
    )?);

    for (i, &sample) in fields.sample_id.iter().enumerate() {
        let near = fields.delta_near[i];
        let mid = fields.delta_mid[i];
        let long = fields.delta_long[i];

        for (j, &latitude) in fields.lat.iter().enumerate() {
            for (k, &longitude) in fields.lon.iter().enumerate() {
                sample_col.push(sample);
                lat_col.push(latitude);
                lon_col.push(longitude);
                model_col.push(fields.hist_trd_model[[i, j, k]]);
                // Independent of sample
                obs_col.push(fields.hist_trd_obs[[j, k]]);
                near_col.push(near);
                mid_col.push(mid);
                long_col.push(long);
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let columns: Vec<Column> = vec![
        Series::new(COL_SAMPLE_ID.into(), sample_col).into(),
        Series::new(COL_LATITUDE.into(), lat_col).into(),
        Series::new(COL_LONGITUDE.into(), lon_col).into(),
        Series::new(COL_HIST_TRD_MODEL.into(), model_col).into(),
        Series::new(COL_HIST_TRD_OBS.into(), obs_col).into(),
        Series::new(COL_DELTA_NEAR.into(), near_col).into(),
        Series::new(COL_DELTA_MID.into(), mid_col).into(),
        Series::new(COL_DELTA_LONG.into(), long_col).into(),
    ];

    let df = DataFrame::new(columns)?;
    Ok(df)
}
