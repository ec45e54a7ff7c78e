//! Linear basis functions on the master element
//!
//! Every segment `[x_i, x_{i+1}]` of a spline is mapped onto the canonical
//! interval `ξ ∈ [-1, 1]` by a [`MasterElement`]. On that interval two linear
//! [`LinearBasis`] functions are active:
//!
//! ```math
//! B₁(ξ) = (1 − ξ) / 2     B₁'(ξ) = −1/2
//! B₂(ξ) = (1 + ξ) / 2     B₂'(ξ) = +1/2
//! ```
//!
//! `B₁` carries the coefficient of the segment's left knot, `B₂` that of the right knot,
//! so a spline is a sum of hat functions with one nodal value per knot.
use crate::{
    error::{Error, Result},
    value::Value,
};

/// One of the two linear basis functions of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinearBasis {
    /// `B₁(ξ) = (1 − ξ) / 2`, equal to 1 at the left knot
    Falling,

    /// `B₂(ξ) = (1 + ξ) / 2`, equal to 1 at the right knot
    Rising,
}
impl LinearBasis {
    /// Both basis functions, in index order
    pub const ALL: [Self; 2] = [Self::Falling, Self::Rising];

    /// Selects a basis function by its 1-based index.
    ///
    /// # Errors
    /// Returns [`Error::UnknownBasisIndex`] for anything other than 1 or 2.
    pub fn from_index(index: usize) -> Result<Self> {
        match index {
            1 => Ok(Self::Falling),
            2 => Ok(Self::Rising),
            _ => Err(Error::UnknownBasisIndex(index)),
        }
    }

    /// 1-based index of this basis function
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Falling => 1,
            Self::Rising => 2,
        }
    }

    /// Evaluates the basis function at canonical coordinate `xi`
    pub fn value<T: Value>(self, xi: T) -> T {
        match self {
            Self::Falling => T::half() * (T::one() - xi),
            Self::Rising => T::half() * (T::one() + xi),
        }
    }

    /// Derivative of the basis function with respect to `ξ`
    pub fn derivative<T: Value>(self) -> T {
        match self {
            Self::Falling => -T::half(),
            Self::Rising => T::half(),
        }
    }
}

/// Affine map between a segment `[start, start + width]` and `ξ ∈ [-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasterElement<T: Value> {
    start: T,
    width: T,
}
impl<T: Value> MasterElement<T> {
    /// Creates the map for the segment between `start` and `end`
    pub fn new(start: T, end: T) -> Self {
        Self {
            start,
            width: end - start,
        }
    }

    /// Width `h` of the segment
    pub fn width(&self) -> T {
        self.width
    }

    /// Maps `x` to `ξ = 2(x − x_i)/h − 1`
    pub fn to_canonical(&self, x: T) -> T {
        T::two() * (x - self.start) / self.width - T::one()
    }

    /// Maps `ξ` back to `x`
    pub fn from_canonical(&self, xi: T) -> T {
        self.start + (xi + T::one()) * self.width / T::two()
    }

    /// `dξ/dx = 2/h`, turning `ξ`-derivatives into `x`-derivatives
    pub fn jacobian(&self) -> T {
        T::two() / self.width
    }
}
