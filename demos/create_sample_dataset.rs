//! Creates a small synthetic warming dataset for trying warmview end to end.
//!
//! The generated file carries all five named variables over a 10-sample,
//! 36 x 72 grid, with smooth latitude-dependent fields so the rendered
//! heatmaps look plausible.
//!
//! Run with: cargo run --example create_sample_dataset

use ndarray::{Array1, Array2, Array3};
use std::path::Path;

const N_SAMPLES: usize = 10;
const N_LAT: usize = 36;
const N_LON: usize = 72;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = Path::new("data.nc");

    println!("Creating sample warming dataset: {}", output_path.display());

    if output_path.exists() {
        std::fs::remove_file(output_path)?;
    }

    let mut file = netcdf::create(output_path)?;

    file.add_attribute("title", "Synthetic GSAT warming sample data")?;
    file.add_attribute("created_by", "create_sample_dataset.rs")?;

    file.add_dimension("sample_id", N_SAMPLES)?;
    file.add_dimension("lat", N_LAT)?;
    file.add_dimension("lon", N_LON)?;

    let lat: Vec<f64> = (0..N_LAT).map(|j| -87.5 + j as f64 * 5.0).collect();
    let lon: Vec<f64> = (0..N_LON).map(|k| -177.5 + k as f64 * 5.0).collect();

    {
        let mut var = file.add_variable::<f64>("lat", &["lat"])?;
        var.put_attribute("units", "degrees_north")?;
        var.put(Array1::from(lat.clone()).view(), ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("lon", &["lon"])?;
        var.put_attribute("units", "degrees_east")?;
        var.put(Array1::from(lon.clone()).view(), ..)?;
    }
    {
        let mut var = file.add_variable::<i32>("sample_id", &["sample_id"])?;
        let ids: Vec<i32> = (1..=N_SAMPLES as i32).collect();
        var.put(Array1::from(ids).view(), ..)?;
    }

    // Observed warming: stronger toward the poles, a gentle zonal wave.
    let mut obs = Array2::zeros((N_LAT, N_LON));
    for (j, &latitude) in lat.iter().enumerate() {
        for (k, &longitude) in lon.iter().enumerate() {
            let polar = 0.8 + 0.9 * (latitude.to_radians().sin()).powi(2);
            let wave = 0.15 * (longitude.to_radians() * 3.0).cos();
            obs[[j, k]] = polar + wave;
        }
    }
    {
        let mut var = file.add_variable::<f64>("GSAT_hist_trd_obs", &["lat", "lon"])?;
        var.put_attribute("units", "K per century")?;
        var.put(obs.view(), ..)?;
    }

    // Modeled warming: the observed pattern plus a per-sample bias and a
    // sample-dependent phase shift.
    let mut model = Array3::zeros((N_SAMPLES, N_LAT, N_LON));
    for i in 0..N_SAMPLES {
        let bias = -0.3 + 0.07 * i as f64;
        let phase = i as f64 * 0.6;
        for (j, &latitude) in lat.iter().enumerate() {
            for (k, &longitude) in lon.iter().enumerate() {
                let wobble = 0.2 * ((longitude.to_radians() * 2.0) + phase).sin()
                    * latitude.to_radians().cos();
                model[[i, j, k]] = obs[[j, k]] + bias + wobble;
            }
        }
    }
    {
        let mut var =
            file.add_variable::<f64>("GSAT_hist_trd_model", &["sample_id", "lat", "lon"])?;
        var.put_attribute("units", "K per century")?;
        var.put(model.view(), ..)?;
    }

    for (name, base) in [
        ("GSAT_delta_model_near", 0.6),
        ("GSAT_delta_model_mid", 1.4),
        ("GSAT_delta_model_long", 2.7),
    ] {
        let deltas: Vec<f64> = (0..N_SAMPLES).map(|i| base + 0.05 * i as f64).collect();
        let mut var = file.add_variable::<f64>(name, &["sample_id"])?;
        var.put_attribute("units", "K")?;
        var.put(Array1::from(deltas).view(), ..)?;
    }

    println!("Wrote {} samples on a {} x {} grid", N_SAMPLES, N_LAT, N_LON);
    println!("\nTry it with:");
    println!("  cargo run -- flatten data.nc output.csv");
    println!("  cargo run -- plot output.csv --sample 3 -o sample_3.png");

    Ok(())
}
