//! Numeric types and iteration utilities for splines.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used for knots, observations and coefficients, ensuring
//! compatibility with nalgebra, floating-point operations, and formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `FloatCore`, `Scalar`, and `RealField` to provide:
//!   - Canonical `two()` and `half()` constants.
//!   - `try_cast` for safe type conversion with error handling.
//!   - Unambiguous `abs` and `powi`.
//!
//! # Iterators
//!
//! - [`SteppedValues`]: A floating-point range iterator with a specified step,
//!   useful for generating evaluation points for a fitted spline.
//!
//! # Example
//!
//! ```rust
//! use smoothspline::value::{SteppedValues, Value};
//!
//! // 0.0, 0.25, 0.5, 0.75, 1.0
//! let xs: Vec<f64> = SteppedValues::new(0.0..=1.0, 0.25).collect();
//! assert_eq!(xs.len(), 5);
//!
//! let half = f64::half();
//! assert_eq!(half * f64::two(), 1.0);
//! ```
use std::ops::RangeInclusive;

use crate::error::Error;

/// Numeric type for knots, observations and coefficients
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
{
    /// Returns the value 2.0
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Returns the value 0.5
    #[must_use]
    fn half() -> Self {
        Self::one() / Self::two()
    }

    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Converts the value to `usize`
    fn as_usize(&self) -> Option<usize> {
        num_traits::cast(*self)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Returns the absolute difference between two values.
    #[must_use]
    fn abs_sub(self, other: Self) -> Self {
        nalgebra::ComplexField::abs(self - other)
    }

    /// True if the value is neither infinite nor NaN
    fn is_real(&self) -> bool {
        num_traits::float::FloatCore::is_finite(*self)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
{
}

/// Iterator over a range of floating-point values with a specified step.
///
/// This iterator yields values starting from `start` up to and including `end`,
/// incrementing by `step` on each iteration.
///
/// Values are computed as `start + i * step` rather than accumulated, so long
/// ranges do not drift.
pub struct SteppedValues<T: Value> {
    range: RangeInclusive<T>,
    step: T,
    index: T,
}
impl<T: Value> SteppedValues<T> {
    /// Creates a new iterator over stepped values in a range
    ///
    /// Will yield values starting from `range.start` up to and including `range.end`
    pub fn new(range: RangeInclusive<T>, step: T) -> Self {
        Self {
            range,
            step,
            index: T::zero(),
        }
    }

    /// Creates a new iterator over stepped values in a range with a step of 1.0
    pub fn new_unit(range: RangeInclusive<T>) -> Self {
        Self::new(range, T::one())
    }

    /// Returns the number of values remaining in the iterator
    pub fn len(&self) -> usize {
        if self.step <= T::zero() {
            return 0;
        }

        let value = *self.range.start() + self.index * self.step;
        if value > *self.range.end() {
            return 0;
        }

        let remaining = *self.range.end() - value;
        let steps = num_traits::float::FloatCore::floor(remaining / self.step);
        steps.as_usize().map_or(0, |s| s + 1)
    }

    /// Returns true if the iterator is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
impl<T: Value> Iterator for SteppedValues<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step <= T::zero() {
            return None;
        }

        let value = *self.range.start() + self.index * self.step;
        if value <= *self.range.end() {
            self.index += T::one();
            Some(value)
        } else {
            None
        }
    }
}
