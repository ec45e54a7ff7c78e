//! Assertions for validating spline fits in tests.
//!
//! If the `plotting` feature is enabled, the spline assertions plot the observations
//! and the fitted curve to `target/plot_output` on failure.
//!
//! ### [`crate::assert_close`]
//! Asserts that two floating-point values are approximately equal.
//! - The default tolerance is `√ε` of the value type, scaled by the magnitude of the operands.
//! - Pass `tol = ...` to pick an absolute tolerance instead.
//!
//! ### [`crate::assert_all_close`]
//! Element-wise [`crate::assert_close`] over two sequences of equal length.
//!
//! ### [`crate::assert_knots_reproduced`]
//! Asserts that a spline passes through the observations at its knots.
//! This is the expected behaviour of an unpenalized (`λ = 0`) fit.
//!
//! ### [`crate::assert_max_residual`]
//! Asserts that no observation is further than a given distance from the spline.
//!
//! ```rust
//! # use smoothspline::{Point, SmoothingSpline, assert_knots_reproduced, assert_max_residual};
//! let knots: Vec<Point> = (0..5).map(|i| Point::on_axis(f64::from(i))).collect();
//! let values = [1.0, 3.0, 2.0, 5.0, 4.0];
//!
//! let exact = SmoothingSpline::fitted(0.0, 1.0, &knots, &values).unwrap();
//! assert_knots_reproduced!(exact, knots, values);
//!
//! let smooth = SmoothingSpline::fitted(0.5, 1.0, &knots, &values).unwrap();
//! assert_max_residual!(smooth, values, 2.0);
//! ```
use crate::value::Value;

mod assertions;

/// Default tolerance used by [`crate::assert_close`] when comparing `a` and `b`.
///
/// `√ε · max(1, |a|, |b|)`
pub fn close_tolerance<T: Value>(a: T, b: T) -> T {
    let scale = nalgebra::RealField::max(
        T::one(),
        nalgebra::RealField::max(Value::abs(a), Value::abs(b)),
    );
    T::epsilon().sqrt() * scale
}

/// Observations paired with the x coordinate of their knots, for plotting and reporting failures.
pub fn observations<T: Value>(knots: &[crate::Point<T>], values: &[T]) -> Vec<(T, T)> {
    knots.iter().zip(values).map(|(p, v)| (p.x(), *v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_tolerance_scales() {
        let small = close_tolerance(0.5_f64, 0.25);
        let large = close_tolerance(1000.0_f64, 999.0);
        assert!(small > 0.0);
        assert!(large > small * 999.0);
    }

    #[test]
    fn test_observations_pairs() {
        let knots = [crate::Point::on_axis(1.0), crate::Point::new(2.0, 5.0, 5.0)];
        assert_eq!(observations(&knots, &[3.0, 4.0]), vec![(1.0, 3.0), (2.0, 4.0)]);
    }
}
