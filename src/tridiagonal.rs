//! Banded storage and Thomas' algorithm for tri-diagonal systems
//!
//! The system is kept as three parallel diagonals plus a right-hand side:
//!
//! ```text
//! | b₀ c₀             |   | x₀ |   | d₀ |
//! | a₁ b₁ c₁          |   | x₁ |   | d₁ |
//! |    a₂ b₂ c₂       | · | x₂ | = | d₂ |
//! |       ⋱  ⋱  ⋱     |   | ⋮  |   | ⋮  |
//! |          aₙ bₙ    |   | xₙ |   | dₙ |
//! ```
//!
//! `a[0]` and `c[n]` are never read.
use nalgebra::DMatrix;

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Smallest pivot magnitude accepted during elimination
pub const PIVOT_TOLERANCE: f64 = 1e-12;

/// A square tri-diagonal linear system `A·x = d`.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem<T: Value> {
    sub: Vec<T>,
    diag: Vec<T>,
    sup: Vec<T>,
    rhs: Vec<T>,
}
impl<T: Value> TridiagonalSystem<T> {
    /// Creates an `n × n` system with every entry and the right-hand side set to zero
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            sub: vec![T::zero(); n],
            diag: vec![T::zero(); n],
            sup: vec![T::zero(); n],
            rhs: vec![T::zero(); n],
        }
    }

    /// Creates a system from its diagonals and right-hand side.
    ///
    /// # Errors
    /// Returns [`Error::BandMismatch`] if the four vectors differ in length or are empty.
    pub fn from_diagonals(sub: Vec<T>, diag: Vec<T>, sup: Vec<T>, rhs: Vec<T>) -> Result<Self> {
        let n = diag.len();
        if n == 0 || sub.len() != n || sup.len() != n || rhs.len() != n {
            return Err(Error::BandMismatch {
                sub: sub.len(),
                diag: n,
                sup: sup.len(),
                rhs: rhs.len(),
            });
        }

        Ok(Self {
            sub,
            diag,
            sup,
            rhs,
        })
    }

    /// Number of unknowns
    #[must_use]
    pub fn len(&self) -> usize {
        self.diag.len()
    }

    /// True if the system has no unknowns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Sub-diagonal `a`
    pub fn sub_diagonal(&self) -> &[T] {
        &self.sub
    }

    /// Main diagonal `b`
    pub fn diagonal(&self) -> &[T] {
        &self.diag
    }

    /// Super-diagonal `c`
    pub fn super_diagonal(&self) -> &[T] {
        &self.sup
    }

    /// Right-hand side `d`
    pub fn rhs(&self) -> &[T] {
        &self.rhs
    }

    /// Adds `value` to `b[i]`
    pub fn add_diagonal(&mut self, i: usize, value: T) {
        self.diag[i] += value;
    }

    /// Adds `value` symmetrically to the coupling between unknowns `i` and `i + 1`,
    /// that is to `c[i]` and `a[i + 1]`
    pub fn add_coupling(&mut self, i: usize, value: T) {
        self.sup[i] += value;
        self.sub[i + 1] += value;
    }

    /// Adds `value` to `d[i]`
    pub fn add_rhs(&mut self, i: usize, value: T) {
        self.rhs[i] += value;
    }

    /// Expands the band into a dense matrix
    #[must_use]
    pub fn to_dense(&self) -> DMatrix<T> {
        let n = self.len();
        DMatrix::from_fn(n, n, |row, col| {
            if row == col {
                self.diag[row]
            } else if row + 1 == col {
                self.sup[row]
            } else if col + 1 == row {
                self.sub[row]
            } else {
                T::zero()
            }
        })
    }

    /// Solves the system with Thomas' algorithm, consuming it.
    ///
    /// Forward elimination runs in place over `b` and `d`:
    /// `m = a[j] / b[j-1]`, `b[j] -= m·c[j-1]`, `d[j] -= m·d[j-1]`,
    /// followed by back-substitution into `d`, which becomes the solution.
    ///
    /// # Errors
    /// Returns [`Error::SingularSystem`] if any pivot `|b[j]|` falls below [`PIVOT_TOLERANCE`].
    pub fn solve(self) -> Result<Vec<T>> {
        let Self {
            sub: a,
            diag: mut b,
            sup: c,
            rhs: mut x,
        } = self;

        let n = b.len();
        if n == 0 {
            return Ok(x);
        }

        let tolerance = T::try_cast(PIVOT_TOLERANCE)?;
        let check_pivot = |row: usize, pivot: T| {
            if Value::abs(pivot) < tolerance || !pivot.is_real() {
                Err(Error::SingularSystem {
                    row,
                    pivot: format!("{pivot:e}"),
                })
            } else {
                Ok(())
            }
        };

        // Forward elimination
        for j in 1..n {
            check_pivot(j - 1, b[j - 1])?;
            let m = a[j] / b[j - 1];
            b[j] -= m * c[j - 1];
            let carried = m * x[j - 1];
            x[j] -= carried;
        }

        // Back-substitution
        let last = n - 1;
        check_pivot(last, b[last])?;
        x[last] /= b[last];
        for j in (0..last).rev() {
            let next = x[j + 1];
            x[j] = (x[j] - c[j] * next) / b[j];
        }

        log::trace!("tri-diagonal solve of {n} unknowns complete");
        Ok(x)
    }
}
