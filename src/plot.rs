//! Debug utilities for plotting splines against their observations
//!
//! ```no_run
//! use smoothspline::{plot::{plot_splines, PlotOptions}, SmoothingSpline};
//!
//! let data: Vec<(f64, f64)> = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 2.0), (3.0, 5.0)];
//! let exact = SmoothingSpline::from_data(0.0, 1.0, &data).unwrap();
//! let smooth = SmoothingSpline::from_data(0.7, 1.0, &data).unwrap();
//!
//! let path = smoothspline::plot_filename!(Some("example"));
//! plot_splines(&path, &[&exact, &smooth], &data, &PlotOptions::default()).unwrap();
//! ```
use std::{ops::Range, path::Path};

use plotters::prelude::*;

pub use plotters;

use crate::{
    error::{Error, Result},
    value::Value,
    SmoothingSpline,
};

const PALETTE: [RGBColor; 5] = [RED, BLUE, GREEN, MAGENTA, CYAN];

/// Options for [`plot_splines`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Caption drawn above the chart
    pub title: String,

    /// Image size in pixels
    pub size: (u32, u32),

    /// Number of points each spline is sampled at
    pub samples: usize,
}
impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: "Graph Output".to_string(),
            size: (640, 480),
            samples: 200,
        }
    }
}

/// Plots observations as a scatter and each spline as a line to a PNG file.
///
/// Splines are sampled evenly over their own knot range. All values are converted to `f64`.
///
/// # Errors
/// Returns [`Error::NotFitted`] if a spline has not been fitted, or [`Error::Plot`] if there is
/// nothing to draw or drawing fails.
pub fn plot_splines<T: Value>(
    path: &Path,
    splines: &[&SmoothingSpline<T>],
    observations: &[(T, T)],
    options: &PlotOptions,
) -> Result<()> {
    let data = observations
        .iter()
        .map(|&(x, y)| Ok((cast(x)?, cast(y)?)))
        .collect::<Result<Vec<_>>>()?;

    let samples = options.samples.max(2);
    let mut curves = Vec::with_capacity(splines.len());
    for spline in splines {
        let range = spline.x_range()?;
        let step = (*range.end() - *range.start()) / T::from_positive_int(samples - 1);
        let curve = spline
            .solve_range(range, step)?
            .into_iter()
            .map(|(x, y)| Ok((cast(x)?, cast(y)?)))
            .collect::<Result<Vec<_>>>()?;
        curves.push(curve);
    }

    let (x_range, y_range) = bounds(data.iter().chain(curves.iter().flatten()).copied())
        .ok_or_else(|| Error::Plot("nothing to plot".to_string()))?;

    let root = BitMapBackend::new(path, options.size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 24).into_font())
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|v| format!("{v:.2e}"))
        .y_label_formatter(&|v| format!("{v:.2e}"))
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(data.iter().map(|&p| Circle::new(p, 2, BLACK.filled())))
        .map_err(plot_error)?
        .label("Observations")
        .legend(|p| Circle::new(p, 2, BLACK.filled()));

    for (i, (spline, curve)) in splines.iter().zip(curves).enumerate() {
        let style = PALETTE[i % PALETTE.len()].stroke_width(2);
        chart
            .draw_series(LineSeries::new(curve, style))
            .map_err(plot_error)?
            .label(format!("λ = {}, W = {}", spline.smooth(), spline.weight()))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    log::debug!("wrote plot to {}", path.display());
    Ok(())
}

/// Generate a filename for a plot: `target/plot_output/{prefix_}{file}_line_{line}.png`
///
/// Creates the necessary directories if they don't exist.
///
/// `plot_filename!(Some("prefix"))` will prepend `prefix_` to the filename.
/// The target directory can be moved with the `TARGET_DIR` environment variable.
#[macro_export]
macro_rules! plot_filename {
    ($prefix:expr) => {{
        let prefix: Option<String> = $prefix.map(|s| s.to_string());
        let prefix = match prefix {
            Some(p) if !p.is_empty() => format!("{p}_"),
            _ => String::new(),
        };

        let file = file!().replace(['/', '\\'], "_");
        let line = line!();

        let target_dir = ::std::env::var("TARGET_DIR").unwrap_or_else(|_| "target".into());
        let plots_dir = ::std::path::Path::new(&target_dir).join("plot_output");
        let _ = std::fs::create_dir_all(&plots_dir);

        plots_dir.join(format!("{prefix}{file}_line_{line}.png"))
    }};
}

/// Smallest ranges covering every point, padded by 5% so nothing sits on the frame
fn bounds(points: impl Iterator<Item = (f64, f64)>) -> Option<(Range<f64>, Range<f64>)> {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for (px, py) in points.filter(|(px, py)| px.is_finite() && py.is_finite()) {
        x = (x.0.min(px), x.1.max(px));
        y = (y.0.min(py), y.1.max(py));
    }

    if x.0 > x.1 {
        return None;
    }

    let pad = |(lo, hi): (f64, f64)| {
        let margin = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
        (lo - margin)..(hi + margin)
    };
    Some((pad(x), pad(y)))
}

fn cast<T: Value>(value: T) -> Result<f64> {
    num_traits::cast(value).ok_or(Error::CastFailed)
}

#[allow(clippy::needless_pass_by_value)]
fn plot_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Plot(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn test_bounds_padding() {
        let (x, y) = bounds([(0.0, 1.0), (10.0, 3.0), (5.0, f64::NAN)].into_iter()).unwrap();
        assert_close!(x.start, -0.5);
        assert_close!(x.end, 10.5);
        assert_close!(y.start, 0.9);
        assert_close!(y.end, 3.1);
    }

    #[test]
    fn test_bounds_flat_and_empty() {
        let (_, y) = bounds([(0.0, 2.0), (1.0, 2.0)].into_iter()).unwrap();
        assert_close!(y.start, 1.0);
        assert_close!(y.end, 3.0);
        assert!(bounds(std::iter::empty()).is_none());
    }

    #[test]
    fn test_unfitted_spline_is_rejected() {
        let spline = SmoothingSpline::<f64>::new(0.5, 1.0);
        let path = crate::plot_filename!(Some("unfitted"));
        let result = plot_splines(&path, &[&spline], &[(0.0, 1.0)], &PlotOptions::default());
        assert!(matches!(result, Err(Error::NotFitted)));
    }

    #[test]
    fn test_nothing_to_plot() {
        let path = crate::plot_filename!(Some("empty"));
        let result = plot_splines::<f64>(&path, &[], &[], &PlotOptions::default());
        assert!(matches!(result, Err(Error::Plot(_))));
    }

    #[test]
    fn test_plot_writes_file() {
        let data: Vec<(f64, f64)> = (0..20).map(|i| (f64::from(i), f64::from(i % 4))).collect();
        let spline = SmoothingSpline::from_data(0.5, 1.0, &data).unwrap();
        let path = crate::plot_filename!(Some("plot_writes_file"));

        // Text rendering needs a system font; a missing one is the only acceptable failure
        match plot_splines(&path, &[&spline], &data, &PlotOptions::default()) {
            Ok(()) => {
                let written = std::fs::metadata(&path).unwrap();
                assert!(written.len() > 0, "{} is empty", path.display());
            }
            Err(Error::Plot(message)) => assert!(
                message.contains("Font loading error"),
                "plot failed without a font problem: {message}"
            ),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
