/// Asserts that two floating-point values are approximately equal.
///
/// This is useful for comparing computed values where exact equality is not expected due to rounding errors.
/// - Without `tol`, uses [`crate::test::close_tolerance`]: `√ε` scaled by the operands' magnitude.
/// - With `tol = x`, uses `x` as an absolute tolerance.
///
/// # Panics
/// Panics if `|a - b|` exceeds the tolerance, or if either value is NaN.
///
/// # Examples
/// ```
/// # use smoothspline::assert_close;
/// assert_close!(1.0 + 1e-16, 1.0, "Nearly equal");
/// assert_close!(0.1 + 0.2, 0.3, tol = 1e-15);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($a:expr, $b:expr, tol = $tol:expr $(, $($msg:tt)+)?) => { #[allow(clippy::float_cmp)] {
        #[allow(unused_mut, unused_assignments)] let mut msg = "Values not close".to_string();
        $( msg = format!($($msg)+); )?

        let (a, b) = ($a, $b);
        let tol = $tol;
        assert!(
            a == b || $crate::value::Value::abs(a - b) <= tol,
            "{msg}: {a} != {b} (tolerance {tol:e})"
        );
    }};

    ($a:expr, $b:expr $(, $($msg:tt)+)?) => {{
        let (a, b) = ($a, $b);
        let tol = $crate::test::close_tolerance(a, b);
        $crate::assert_close!(a, b, tol = tol $(, $($msg)+)?);
    }};
}

/// Asserts that two sequences of floating-point values are approximately equal element-wise.
///
/// - Element-wise [`crate::assert_close`], with the same optional `tol = x`.
///
/// # Panics
/// - If the lengths differ.
/// - If any pair of elements is not close.
///
/// # Examples
/// ```
/// # use smoothspline::assert_all_close;
/// let a = vec![1.0, 2.0, 3.0];
/// let b = vec![1.0 + 1e-16, 2.0, 3.0];
///
/// assert_all_close!(a, b);
/// assert_all_close!(a, b, tol = 1e-12);
/// ```
#[macro_export]
macro_rules! assert_all_close {
    ($src:expr, $dst:expr $(, tol = $tol:expr)?) => {{
        let (src, dst) = (&$src, &$dst);
        assert_eq!(src.len(), dst.len(), "{} elements - length mismatch", src.len());

        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            #[allow(unused_variables)] let tol = $crate::test::close_tolerance(*s, *d);
            $( let tol = $tol; )?
            $crate::assert_close!(*s, *d, tol = tol, "src[{}]", i);
        }
    }};
}

/// Asserts that a spline passes through the observations at its knots.
///
/// This holds for any unpenalized (`λ = 0`) fit, whatever the weight.
///
/// If the assertion fails and the `plotting` feature is enabled, a plot of the
/// observations and the spline is written to `target/plot_output`.
///
/// # Parameters
/// - `$spline`: A fitted [`crate::SmoothingSpline`].
/// - `$knots`: The knots the spline was fitted to.
/// - `$values`: The observations at those knots.
/// - `tol = x` *(optional)*: Absolute tolerance. Defaults to [`crate::test::close_tolerance`].
///
/// # Panics
/// Panics if any knot cannot be evaluated or its value is not close to the observation.
#[macro_export]
macro_rules! assert_knots_reproduced {
    ($spline:expr, $knots:expr, $values:expr $(, tol = $tol:expr)?) => {{
        #[allow(unused_imports)] use $crate::Spline as _;
        let spline = &$spline;
        let knots = &$knots;
        let values = &$values;
        assert_eq!(knots.len(), values.len(), "knot and value counts differ");

        for (i, (knot, expected)) in knots.iter().zip(values.iter()).enumerate() {
            let actual = match spline.evaluate(knot) {
                Ok(evaluation) => evaluation.value,
                Err(e) => panic!("Failed to evaluate knot {i}: {e}"),
            };

            #[allow(unused_variables)] let tol = $crate::test::close_tolerance(actual, *expected);
            $( let tol = $tol; )?

            if $crate::value::Value::abs(actual - *expected) > tol {
                #[allow(unused_mut)] let mut msg = format!(
                    "Spline does not reproduce knot {i}: {actual} != {expected} (tolerance {tol:e})"
                );

                #[cfg(feature = "plotting")]
                {
                    #[allow(unused)] use std::fmt::Write;
                    let path = $crate::plot_filename!(Some("assert_knots_reproduced"));
                    let data = $crate::test::observations(knots, values);
                    if $crate::plot::plot_splines(&path, &[spline], &data, &Default::default()).is_ok() {
                        write!(msg, "\nFailure plot saved to: {}", path.display()).ok();
                    }
                }

                panic!("{msg}");
            }
        }
    }};
}

/// Asserts that every observation lies within `max` of the spline.
///
/// # Parameters
/// - `$spline`: A fitted [`crate::SmoothingSpline`].
/// - `$values`: The observations the spline was fitted to, one per knot.
/// - `$max`: Largest allowed absolute residual.
///
/// # Panics
/// Panics if the residuals cannot be computed or any residual exceeds `max`.
/// If the `plotting` feature is enabled, a failure plot is generated.
#[macro_export]
macro_rules! assert_max_residual {
    ($spline:expr, $values:expr, $max:expr $(, $($msg:tt)+)?) => {{
        let spline = &$spline;
        let values = &$values;
        let max = $max;

        let residuals = match spline.residuals(&values[..]) {
            Ok(residuals) => residuals,
            Err(e) => panic!("Failed to compute residuals: {e}"),
        };

        let worst = residuals
            .iter()
            .enumerate()
            .map(|(i, r)| (i, $crate::value::Value::abs(*r)))
            .fold(None, |acc: Option<(usize, _)>, (i, r)| match acc {
                Some((_, best)) if best >= r => acc,
                _ => Some((i, r)),
            });

        if let Some((index, worst)) = worst {
            if worst > max {
                #[allow(unused_mut, unused_assignments)] let mut msg = format!(
                    "Residual at knot {index} above threshold: {worst} > {max}"
                );
                $( msg = format!("{msg}: {}", format!($($msg)+)); )?

                #[cfg(feature = "plotting")]
                {
                    #[allow(unused)] use std::fmt::Write;
                    let path = $crate::plot_filename!(Some("assert_max_residual"));
                    let data = $crate::test::observations(spline.knots(), &values[..]);
                    if $crate::plot::plot_splines(&path, &[spline], &data, &Default::default()).is_ok() {
                        write!(msg, "\nFailure plot saved to: {}", path.display()).ok();
                    }
                }

                panic!("{msg}");
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Point, SmoothingSpline};

    #[test]
    fn test_assert_close_macro() {
        assert_close!(1.0 + 1e-16, 1.0, "Values should be close");
        assert_close!(10.0_f32, 10.0 + 1e-5);
        assert_close!(1.0, 1.0 + 1e-9, tol = 1e-8);
    }

    #[test]
    #[should_panic(expected = "Values not close")]
    fn test_assert_close_fails() {
        assert_close!(1.0, 1.1);
    }

    #[test]
    fn test_assert_all_close_macro() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0 + 1e-16, 2.0, 3.0];
        assert_all_close!(a, b);
        assert_all_close!(a.to_vec(), b, tol = 1e-12);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_assert_all_close_length() {
        assert_all_close!([1.0, 2.0], [1.0]);
    }

    #[test]
    fn test_spline_assertions() {
        let knots: Vec<Point> = (0..6).map(|i| Point::on_axis(f64::from(i))).collect();
        let values = [0.0, 2.0, -1.0, 4.0, 3.0, 0.5];

        let exact = SmoothingSpline::fitted(0.0, 1.0, &knots, &values).unwrap();
        assert_knots_reproduced!(exact, knots, values);
        assert_knots_reproduced!(exact, knots, values, tol = 1e-12);
        assert_max_residual!(exact, values, 1e-12);

        let smoothed = SmoothingSpline::fitted(0.9, 1.0, &knots, &values).unwrap();
        assert_max_residual!(smoothed, values, 5.0, "smoothed spline");
    }

    #[test]
    #[should_panic(expected = "does not reproduce knot")]
    fn test_assert_knots_reproduced_fails() {
        let knots: Vec<Point> = (0..4).map(|i| Point::on_axis(f64::from(i))).collect();
        let values = [0.0, 5.0, -5.0, 0.0];
        let smoothed = SmoothingSpline::fitted(0.9, 1.0, &knots, &values).unwrap();
        assert_knots_reproduced!(smoothed, knots, values);
    }
}
