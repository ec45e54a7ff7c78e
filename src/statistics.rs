//! Functions for describing observations and scoring spline fits
//!
//! # Fit Diagnostics
//! - [`r_squared`]: Proportion of variance explained by the spline. Higher is better (0 to 1).
//!
//! # Error Metrics
//! - [`mean_absolute_error`]: Average absolute difference between observed and smoothed values. Lower is better.
//! - [`mean_squared_error`]: Average squared difference between observed and smoothed values. Lower is better.
//! - [`root_mean_squared_error`]: Square root of MSE, giving error in same units as observed values. Lower is better.
//!
//! # Descriptive Statistics
//! - [`mean`]: Arithmetic mean of a dataset.
//! - [`stddev_and_mean`]: Standard deviation and mean of a dataset.
//! - [`spread`]: Difference between maximum and minimum values in a dataset.
//!
//! # Examples
//!
//! ```rust
//! use smoothspline::statistics::{r_squared, stddev_and_mean};
//!
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.1, 1.9, 3.05];
//!
//! let r2 = r_squared(y.iter().copied(), y_fit.iter().copied());
//! let (sigma, mean) = stddev_and_mean(y.into_iter());
//! println!("R² = {r2}, M = {mean}, σ = {sigma}");
//! ```
use crate::value::Value;

/// Calculate the R-squared value for a set of data.
///
/// R-squared is a number between 0 and 1 that tells you how well the spline explains the data:
/// - `0` means the spline explains none of the variation (a flat line at the mean).
/// - `1` means the spline passes through every observation.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// If the observations are constant (`SS_tot = 0`), returns 1 for a perfect fit and 0 otherwise.
///
/// # Example
/// ```rust
/// # use smoothspline::statistics::r_squared;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![1.1, 1.9, 3.05];
/// let r2 = r_squared(y.into_iter(), y_fit.into_iter());
/// assert!(r2 > 0.9);
/// ```
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    if ss_total == T::zero() {
        return if ss_residual == T::zero() {
            T::one()
        } else {
            T::zero()
        };
    }

    T::one() - (ss_residual / ss_total)
}

/// Computes the arithmetic mean of a sequence of values.
///
/// ```math
/// Mean = (Σ x_i) / N
/// ```
///
/// Returns NaN if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![1.0, 2.0, 3.0];
/// let m = smoothspline::statistics::mean(values.into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for value in data {
        sum += value;
        count += T::one();
    }
    sum / count
}

/// Computes the standard deviation of a sequence of values, along with the mean.
/// - Uses the population formula (divides by `N`) rather than `N-1`.
///
/// # Returns
/// `(standard_deviation, mean)`
///
/// # Examples
/// ```rust
/// let values = vec![1.0, 2.0, 3.0];
/// let (s, m) = smoothspline::statistics::stddev_and_mean(values.into_iter());
/// assert_eq!(m, 2.0);
/// assert_eq!(s, 0.816496580927726); // sqrt(2/3)
/// ```
pub fn stddev_and_mean<T: Value>(data: impl Iterator<Item = T>) -> (T, T) {
    let data: Vec<_> = data.collect();
    let mean = mean(data.iter().copied());
    let mut sum_sq_diff = T::zero();
    let mut count = T::zero();
    for value in data {
        sum_sq_diff += Value::powi(value - mean, 2);
        count += T::one();
    }
    let dev = (sum_sq_diff / count).sqrt();

    (dev, mean)
}

/// Difference between the largest and smallest value.
///
/// # Examples
/// ```rust
/// let values = vec![4.0, 1.0, 9.0];
/// let r = smoothspline::statistics::spread(values.into_iter());
/// assert_eq!(r, 8.0); // 9 - 1
/// ```
pub fn spread<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut min = T::infinity();
    let mut max = T::neg_infinity();
    for value in data {
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }
    max - min
}

/// Computes the mean absolute error (MAE) between two sets of values.
///
/// ```math
/// MAE = (Σ |y_i - y_fit_i|) / N
/// ```
pub fn mean_absolute_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let mut total = T::zero();
    let mut n = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        total += Value::abs(y - y_fit);
        n += T::one();
    }
    total / n
}

/// Computes the root mean squared error (RMSE) between two sets of values.
///
/// ```math
/// RMSE = √( Σ (y_i - y_fit_i)² / N )
/// ```
pub fn root_mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    mean_squared_error(y, y_fit).sqrt()
}

/// Computes the mean squared error (MSE) between two sets of values.
///
/// ```math
/// MSE = Σ (y_i - y_fit_i)² / N
/// ```
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let mut total = T::zero();
    let mut n = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        total += Value::powi(y - y_fit, 2);
        n += T::one();
    }
    total / n
}
