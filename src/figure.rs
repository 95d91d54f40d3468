//! # Heatmap Figure
//!
//! This module builds the three-panel comparison figure for one sample:
//! modeled warming, observed warming, and their difference, rendered
//! left-to-right as color-mapped images over (longitude, latitude).
//!
//! Figure construction is split from display. [`WarmingFigure::new`]
//! computes the difference grid and the shared color ranges and is plain
//! data; [`WarmingFigure::show`] and [`WarmingFigure::save_png`] hand the
//! figure to gnuplot.

use crate::grids::SampleGrids;
use gnuplot::{AutoOption::Fix, AxesCommon, Figure, PaletteType};
use ndarray::Array2;

/// Blue-white-red stops for the diverging warming palette.
const DIVERGING_STOPS: [(f32, f32, f32, f32); 3] = [
    (0.0, 0.23, 0.30, 0.75),
    (0.5, 0.87, 0.87, 0.87),
    (1.0, 0.71, 0.02, 0.15),
];

/// A fully computed three-panel figure, ready to render.
///
/// `field_range` spans the union of the modeled and observed values and is
/// applied identically to both field panels so they are visually
/// comparable; `diff_range` spans only the difference grid.
#[derive(Debug, Clone)]
pub struct WarmingFigure {
    pub sample_id: i64,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub modeled: Array2<f64>,
    pub observed: Array2<f64>,
    pub difference: Array2<f64>,
    pub field_range: (f64, f64),
    pub diff_range: (f64, f64),
}

impl WarmingFigure {
    /// Computes the difference grid (modeled - observed, elementwise, no
    /// clamping) and the two color ranges from reconstructed grids.
    pub fn new(grids: SampleGrids) -> Self {
        let difference = &grids.modeled - &grids.observed;

        let field_range = pad_degenerate((
            grid_min(&grids.modeled).min(grid_min(&grids.observed)),
            grid_max(&grids.modeled).max(grid_max(&grids.observed)),
        ));
        let diff_range = pad_degenerate((grid_min(&difference), grid_max(&difference)));

        WarmingFigure {
            sample_id: grids.sample_id,
            lat: grids.lat,
            lon: grids.lon,
            modeled: grids.modeled,
            observed: grids.observed,
            difference,
            field_range,
            diff_range,
        }
    }

    /// Builds the gnuplot figure: a 1x3 multiplot of the three panels.
    pub fn render(&self) -> Figure {
        let mut fg = Figure::new();
        fg.set_multiplot_layout(1, 3)
            .set_title(&format!("Sample ID: {} - Warming Visualization", self.sample_id));

        self.draw_panel(
            &mut fg,
            "Modeled Warming",
            "Modeled Warming",
            &self.modeled,
            self.field_range,
        );
        self.draw_panel(
            &mut fg,
            "Observed Warming",
            "Observed Warming",
            &self.observed,
            self.field_range,
        );
        self.draw_panel(
            &mut fg,
            "Difference (Modeled - Observed)",
            "Difference",
            &self.difference,
            self.diff_range,
        );
        fg
    }

    /// Launches the interactive gnuplot viewer and blocks until it is
    /// dismissed.
    pub fn show(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut fg = self.render();
        let sentinel = fg
            .show()
            .map_err(|e| format!("Failed to launch gnuplot: {:?}", e))?;
        // Dropping the sentinel waits for the viewer to close.
        drop(sentinel);
        Ok(())
    }

    /// Renders the figure to a PNG file instead of a window.
    pub fn save_png(
        &self,
        path: &str,
        width: u32,
        height: u32,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut fg = self.render();
        fg.set_terminal(&format!("pngcairo size {},{}", width, height), path);
        let sentinel = fg
            .show()
            .map_err(|e| format!("Failed to render PNG via gnuplot: {:?}", e))?;
        drop(sentinel);
        Ok(())
    }

    fn draw_panel(
        &self,
        fg: &mut Figure,
        title: &str,
        cb_label: &str,
        grid: &Array2<f64>,
        range: (f64, f64),
    ) {
        let (x1, x2) = (self.lon[0], self.lon[self.lon.len() - 1]);
        // Row 0 sits at the lower y edge, so latitude increases upward.
        let (y1, y2) = (self.lat[0], self.lat[self.lat.len() - 1]);

        fg.axes2d()
            .set_title(title, &[])
            .set_x_label("Longitude", &[])
            .set_y_label("Latitude", &[])
            .set_cb_label(cb_label, &[])
            .set_palette(PaletteType::Custom(&DIVERGING_STOPS))
            .set_cb_range(Fix(range.0), Fix(range.1))
            .image(
                grid.iter(),
                self.lat.len(),
                self.lon.len(),
                Some((x1, y1, x2, y2)),
                &[],
            );
    }
}

fn grid_min(grid: &Array2<f64>) -> f64 {
    grid.iter().fold(f64::INFINITY, |acc, &v| acc.min(v))
}

fn grid_max(grid: &Array2<f64>) -> f64 {
    grid.iter().fold(f64::NEG_INFINITY, |acc, &v| acc.max(v))
}

// gnuplot rejects an empty cbrange, so a constant grid gets a unit span.
fn pad_degenerate((lo, hi): (f64, f64)) -> (f64, f64) {
    if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) }
}
