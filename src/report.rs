//! Tabular reports comparing smoothing strengths over one set of observations
//!
//! A [`SmoothingTable`] holds the observations, the weight `W` shared by every fit, and one
//! column of smoothed values per smoothing parameter `λ`. It can be written as:
//! - CSV ([`SmoothingTable::to_csv`]): every observation, one column per `λ`
//! - Markdown ([`SmoothingTable::to_markdown`]): the run parameters and a preview of the first rows
//!
//! ```rust
//! use smoothspline::report::{file_suffix, SmoothingTable};
//!
//! let observations = vec![0.5, 2.0, -1.0, 4.0, 3.0];
//! let table = SmoothingTable::fit_all(observations, 1.0, &[0.0, 0.5, 0.99]).unwrap();
//!
//! let mut csv = Vec::new();
//! table.to_csv(&mut csv).unwrap();
//! assert!(String::from_utf8(csv).unwrap().starts_with("observation_number,original_value,p_0,p_0.5,p_0.99"));
//!
//! assert_eq!(file_suffix(1.0), "_W1");
//! ```
use std::io::Write;

use crate::{
    error::{Error, Result},
    statistics,
    value::Value,
    Point, SmoothingSpline,
};

/// File name suffix for a report with weight `weight`.
///
/// `_W1` for a unit weight, `_W05` for anything else.
pub fn file_suffix<T: Value>(weight: T) -> &'static str {
    if weight == T::one() {
        "_W1"
    } else {
        "_W05"
    }
}

/// Observations alongside the splines fitted to them, one column per smoothing parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingTable<T: Value = f64> {
    observations: Vec<T>,
    weight: T,
    mean: T,
    stddev: T,
    columns: Vec<(T, Vec<T>)>,
}
impl<T: Value> SmoothingTable<T> {
    /// Creates a table with no smoothed columns.
    ///
    /// The mean and standard deviation shown in the Markdown header are taken from the observations;
    /// see [`SmoothingTable::with_parameters`] to report the parameters the data was generated with instead.
    pub fn new(observations: Vec<T>, weight: T) -> Self {
        let (stddev, mean) = statistics::stddev_and_mean(observations.iter().copied());
        Self {
            observations,
            weight,
            mean,
            stddev,
            columns: Vec::new(),
        }
    }

    /// Fits one spline per entry of `smooth` to observations placed at `x = 0, 1, 2, ...`,
    /// and collects the smoothed values.
    ///
    /// # Errors
    /// Returns an error if any of the fits fails.
    pub fn fit_all(observations: Vec<T>, weight: T, smooth: &[T]) -> Result<Self> {
        let knots: Vec<Point<T>> = (0..observations.len())
            .map(|i| Point::on_axis(T::from_positive_int(i)))
            .collect();

        let mut table = Self::new(observations, weight);
        for &lambda in smooth {
            log::debug!("fitting λ = {lambda} (W = {weight})");
            let spline = SmoothingSpline::fitted(lambda, weight, &knots, &table.observations)?;
            table.add_spline(&spline)?;
        }

        Ok(table)
    }

    /// Overrides the mean and standard deviation shown in the Markdown header.
    #[must_use]
    pub fn with_parameters(mut self, mean: T, stddev: T) -> Self {
        self.mean = mean;
        self.stddev = stddev;
        self
    }

    /// Adds a column of smoothed values produced with smoothing parameter `smooth`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if `values` does not have one entry per observation.
    pub fn add_column(&mut self, smooth: T, values: Vec<T>) -> Result<()> {
        if values.len() != self.observations.len() {
            return Err(Error::InvalidInput {
                points: self.observations.len(),
                values: values.len(),
            });
        }

        self.columns.push((smooth, values));
        Ok(())
    }

    /// Adds the values of a fitted spline at its knots as a new column.
    ///
    /// # Errors
    /// Returns [`Error::NotFitted`] for an unfitted spline, or [`Error::InvalidInput`]
    /// if it has a different number of knots than there are observations.
    pub fn add_spline(&mut self, spline: &SmoothingSpline<T>) -> Result<()> {
        if !spline.is_fitted() {
            return Err(Error::NotFitted);
        }
        self.add_column(spline.smooth(), spline.solution())
    }

    /// Number of observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True if there are no observations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observation weight shared by every column
    pub fn weight(&self) -> T {
        self.weight
    }

    /// The raw observations
    pub fn observations(&self) -> &[T] {
        &self.observations
    }

    /// `(λ, smoothed values)` for every column, in insertion order
    pub fn columns(&self) -> &[(T, Vec<T>)] {
        &self.columns
    }

    /// Writes every observation and smoothed value as CSV.
    ///
    /// ```text
    /// observation_number,original_value,p_0,p_0.1
    /// 0,1.25,1.25,1.1
    /// ```
    ///
    /// # Errors
    /// Returns [`Error::Io`] if writing fails.
    pub fn to_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "observation_number,original_value")?;
        for (smooth, _) in &self.columns {
            write!(writer, ",p_{smooth}")?;
        }
        writeln!(writer)?;

        for (i, value) in self.observations.iter().enumerate() {
            write!(writer, "{i},{value}")?;
            for (_, smoothed) in &self.columns {
                write!(writer, ",{}", smoothed[i])?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    /// Writes a Markdown summary: the run parameters, then the first `rows` observations
    /// with their smoothed values.
    ///
    /// Observations are shown in scientific notation with 8 fractional digits,
    /// smoothed values with 5.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if writing fails.
    pub fn to_markdown<W: Write>(&self, mut writer: W, rows: usize) -> Result<()> {
        writeln!(writer, "# Smoothing spline results")?;
        writeln!(writer)?;
        writeln!(writer, "| Observations N | Mean M | Deviation σ | Weight W |")?;
        writeln!(writer, "|---|---|---|---|")?;
        writeln!(
            writer,
            "| {} | {:.2} | {:.2} | {:.2} |",
            self.len(),
            self.mean,
            self.stddev,
            self.weight
        )?;
        writeln!(writer)?;
        writeln!(writer, "---")?;
        writeln!(writer)?;
        writeln!(writer, "### Observations and smoothed values")?;
        writeln!(writer)?;

        write!(writer, "| # | Observation | Weight w |")?;
        for (smooth, _) in &self.columns {
            write!(writer, " λ = {smooth} |")?;
        }
        writeln!(writer)?;

        write!(writer, "|---|---|---|")?;
        for _ in &self.columns {
            write!(writer, "---|")?;
        }
        writeln!(writer)?;

        for (i, value) in self.observations.iter().take(rows).enumerate() {
            write!(writer, "| {} | {value:.8e} | {:.2} |", i + 1, self.weight)?;
            for (_, smoothed) in &self.columns {
                write!(writer, " {:.5e} |", smoothed[i])?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_all_close;

    fn sample_table() -> SmoothingTable {
        let observations = vec![1.0, 3.0, 2.0, 5.0, 4.0, 0.0, 2.5, -1.0, 3.5, 1.5, 2.0, 4.5];
        SmoothingTable::fit_all(observations, 1.0, &[0.0, 0.1, 0.5, 0.7, 0.99]).unwrap()
    }

    #[test]
    fn test_file_suffix() {
        assert_eq!(file_suffix(1.0), "_W1");
        assert_eq!(file_suffix(0.5), "_W05");
        assert_eq!(file_suffix(2.0_f32), "_W05");
    }

    #[test]
    fn test_fit_all_columns() {
        let table = sample_table();
        assert_eq!(table.len(), 12);
        assert_eq!(table.columns().len(), 5);

        // λ = 0 reproduces the observations
        let (smooth, exact) = &table.columns()[0];
        assert_eq!(*smooth, 0.0);
        assert_all_close!(exact, table.observations(), tol = 1e-9);
    }

    #[test]
    fn test_csv_layout() {
        let table = sample_table();
        let mut out = Vec::new();
        table.to_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "observation_number,original_value,p_0,p_0.1,p_0.5,p_0.7,p_0.99");
        assert_eq!(lines.len(), 13);
        assert!(lines[1].starts_with("0,1,"));
        assert!(lines.iter().skip(1).all(|l| l.split(',').count() == 7));
    }

    #[test]
    fn test_markdown_layout() {
        let table = sample_table().with_parameters(0.94, 4.95);
        let mut out = Vec::new();
        table.to_markdown(&mut out, 10).unwrap();
        let md = String::from_utf8(out).unwrap();

        assert!(md.contains("| 12 | 0.94 | 4.95 | 1.00 |"));
        assert!(md.contains(
            "| # | Observation | Weight w | λ = 0 | λ = 0.1 | λ = 0.5 | λ = 0.7 | λ = 0.99 |"
        ));
        assert!(md.contains("|---|---|---|---|---|---|---|---|"));
        assert!(md.contains("| 1 | 1.00000000e0 | 1.00 |"));

        let preview = md.split("###").nth(1).unwrap();
        let rows = preview.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| #"));
        assert_eq!(rows.count(), 10);
    }

    #[test]
    fn test_markdown_short_table() {
        let table = SmoothingTable::fit_all(vec![1.0, 2.0, 4.0], 0.5, &[0.5]).unwrap();
        let mut out = Vec::new();
        table.to_markdown(&mut out, 10).unwrap();
        let md = String::from_utf8(out).unwrap();
        assert!(md.contains("| 3 | 4.00000000e0 | 0.50 |"));
        assert!(!md.contains("| 4 |"));
    }

    #[test]
    fn test_add_column_length_mismatch() {
        let mut table = SmoothingTable::new(vec![1.0, 2.0], 1.0);
        assert!(matches!(
            table.add_column(0.5, vec![1.0]),
            Err(Error::InvalidInput {
                points: 2,
                values: 1
            })
        ));
    }

    #[test]
    fn test_add_unfitted_spline() {
        let mut table = SmoothingTable::new(vec![1.0, 2.0], 1.0);
        let spline = SmoothingSpline::new(0.5, 1.0);
        assert!(matches!(table.add_spline(&spline), Err(Error::NotFitted)));
    }

    #[test]
    fn test_fit_all_propagates_errors() {
        let result = SmoothingTable::fit_all(vec![1.0], 1.0, &[0.5]);
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
    }
}
