//! # Gridded Dataset Loading
//!
//! This module reads the warming dataset from a NetCDF file into typed
//! in-memory arrays. The file layout is fixed: three coordinate axes and
//! five data variables with known names and ranks.
//!
//! All arrays are loaded once and held for the duration of the flattening
//! pass. Array extents are checked against the axis lengths right after
//! loading, so a malformed file fails with a descriptive shape error
//! instead of an out-of-bounds index deep inside the flatten loop.

use ndarray::{Array1, Array2, Array3, Ix1, Ix2, Ix3};
use std::path::Path;
use thiserror::Error;

/// Longitude axis variable name.
pub const LON_VAR: &str = "lon";
/// Latitude axis variable name.
pub const LAT_VAR: &str = "lat";
/// Sample identifier axis variable name.
pub const SAMPLE_ID_VAR: &str = "sample_id";
/// Modeled historical warming trend, (sample_id, lat, lon).
pub const HIST_TRD_MODEL_VAR: &str = "GSAT_hist_trd_model";
/// Observed historical warming trend, (lat, lon).
pub const HIST_TRD_OBS_VAR: &str = "GSAT_hist_trd_obs";
/// Near-horizon modeled warming delta, (sample_id).
pub const DELTA_NEAR_VAR: &str = "GSAT_delta_model_near";
/// Mid-horizon modeled warming delta, (sample_id).
pub const DELTA_MID_VAR: &str = "GSAT_delta_model_mid";
/// Long-horizon modeled warming delta, (sample_id).
pub const DELTA_LONG_VAR: &str = "GSAT_delta_model_long";

/// Errors that can occur while loading the dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    #[error("Variable '{0}' not found in NetCDF file")]
    VariableNotFound(String),

    #[error("Variable '{var}' has rank {actual}, expected rank {expected}")]
    Rank {
        var: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Variable '{var}' has shape {actual:?}, expected {expected:?} from the axis lengths")]
    ShapeMismatch {
        var: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

/// The five warming variables plus their coordinate axes, fully loaded.
///
/// Axis order follows the file: `hist_trd_model` is indexed by
/// (sample, lat, lon), `hist_trd_obs` by (lat, lon), and the three delta
/// arrays by (sample).
#[derive(Debug, Clone)]
pub struct WarmingFields {
    pub lon: Array1<f64>,
    pub lat: Array1<f64>,
    pub sample_id: Array1<i64>,
    pub hist_trd_model: Array3<f64>,
    pub hist_trd_obs: Array2<f64>,
    pub delta_near: Array1<f64>,
    pub delta_mid: Array1<f64>,
    pub delta_long: Array1<f64>,
}

impl WarmingFields {
    /// Opens `path` and loads all eight named arrays.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened, a named variable is absent, a
    /// variable's rank differs from the documented layout, or any extent
    /// disagrees with the axis lengths.
    pub fn from_netcdf<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = netcdf::open(path)?;
        let fields = Self::from_file(&file)?;
        file.close()?;
        Ok(fields)
    }

    /// Loads all eight named arrays from an already opened file.
    pub fn from_file(file: &netcdf::File) -> Result<Self, DatasetError> {
        let lon = read_axis_f64(file, LON_VAR)?;
        let lat = read_axis_f64(file, LAT_VAR)?;
        let sample_id = read_axis_i64(file, SAMPLE_ID_VAR)?;

        let hist_trd_model = read_rank3(file, HIST_TRD_MODEL_VAR)?;
        let hist_trd_obs = read_rank2(file, HIST_TRD_OBS_VAR)?;
        let delta_near = read_rank1(file, DELTA_NEAR_VAR)?;
        let delta_mid = read_rank1(file, DELTA_MID_VAR)?;
        let delta_long = read_rank1(file, DELTA_LONG_VAR)?;

        let fields = WarmingFields {
            lon,
            lat,
            sample_id,
            hist_trd_model,
            hist_trd_obs,
            delta_near,
            delta_mid,
            delta_long,
        };
        fields.validate_shapes()?;
        Ok(fields)
    }

    /// Number of samples (S).
    pub fn n_samples(&self) -> usize {
        self.sample_id.len()
    }

    /// Number of latitude points (A).
    pub fn n_lat(&self) -> usize {
        self.lat.len()
    }

    /// Number of longitude points (L).
    pub fn n_lon(&self) -> usize {
        self.lon.len()
    }

    /// Total number of flat rows the dataset expands to (S x A x L).
    pub fn flat_row_count(&self) -> usize {
        self.n_samples() * self.n_lat() * self.n_lon()
    }

    fn validate_shapes(&self) -> Result<(), DatasetError> {
        let (s, a, l) = (self.n_samples(), self.n_lat(), self.n_lon());

        if self.hist_trd_model.dim() != (s, a, l) {
            return Err(DatasetError::ShapeMismatch {
                var: HIST_TRD_MODEL_VAR,
                expected: vec![s, a, l],
                actual: self.hist_trd_model.shape().to_vec(),
            });
        }
        if self.hist_trd_obs.dim() != (a, l) {
            return Err(DatasetError::ShapeMismatch {
                var: HIST_TRD_OBS_VAR,
                expected: vec![a, l],
                actual: self.hist_trd_obs.shape().to_vec(),
            });
        }
        for (var, delta) in [
            (DELTA_NEAR_VAR, &self.delta_near),
            (DELTA_MID_VAR, &self.delta_mid),
            (DELTA_LONG_VAR, &self.delta_long),
        ] {
            if delta.len() != s {
                return Err(DatasetError::ShapeMismatch {
                    var,
                    expected: vec![s],
                    actual: delta.shape().to_vec(),
                });
            }
        }
        Ok(())
    }
}

fn variable<'f>(file: &'f netcdf::File, name: &str) -> Result<netcdf::Variable<'f>, DatasetError> {
    file.variable(name)
        .ok_or_else(|| DatasetError::VariableNotFound(name.to_string()))
}

fn read_axis_f64(file: &netcdf::File, name: &'static str) -> Result<Array1<f64>, DatasetError> {
    let values = variable(file, name)?.get::<f64, _>(..)?;
    let actual = values.ndim();
    values
        .into_dimensionality::<Ix1>()
        .map_err(|_| DatasetError::Rank {
            var: name,
            expected: 1,
            actual,
        })
}

fn read_axis_i64(file: &netcdf::File, name: &'static str) -> Result<Array1<i64>, DatasetError> {
    let values = variable(file, name)?.get::<i64, _>(..)?;
    let actual = values.ndim();
    values
        .into_dimensionality::<Ix1>()
        .map_err(|_| DatasetError::Rank {
            var: name,
            expected: 1,
            actual,
        })
}

fn read_rank1(file: &netcdf::File, name: &'static str) -> Result<Array1<f64>, DatasetError> {
    read_axis_f64(file, name)
}

fn read_rank2(file: &netcdf::File, name: &'static str) -> Result<Array2<f64>, DatasetError> {
    let values = variable(file, name)?.get::<f64, _>(..)?;
    let actual = values.ndim();
    values
        .into_dimensionality::<Ix2>()
        .map_err(|_| DatasetError::Rank {
            var: name,
            expected: 2,
            actual,
        })
}

fn read_rank3(file: &netcdf::File, name: &'static str) -> Result<Array3<f64>, DatasetError> {
    let values = variable(file, name)?.get::<f64, _>(..)?;
    let actual = values.ndim();
    values
        .into_dimensionality::<Ix3>()
        .map_err(|_| DatasetError::Rank {
            var: name,
            expected: 3,
            actual,
        })
}
