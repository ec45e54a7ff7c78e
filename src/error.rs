//! Error types for smoothing spline fitting
//!
//! This module defines the failure modes encountered when fitting or
//! evaluating a spline, along with a convenient `Result` alias.

/// Errors that can occur while fitting or evaluating a smoothing spline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The knot and value sequences do not pair up, or there are fewer than 2 knots.
    #[error("Invalid input: {points} knots and {values} values; a fit needs matching counts of at least 2")]
    InvalidInput {
        /// Number of knots supplied
        points: usize,
        /// Number of observation values supplied
        values: usize,
    },

    /// Two consecutive knots are too close together (or out of order) in x.
    #[error("Segment {index} is degenerate: knot spacing {width} is below the minimum segment width")]
    DegenerateSegment {
        /// Index of the first knot of the segment
        index: usize,
        /// Width of the segment in x
        width: String,
    },

    /// The bands of a tri-diagonal system are empty or do not share one length.
    #[error("Invalid tri-diagonal system: sub-diagonal {sub}, diagonal {diag}, super-diagonal {sup} and right-hand side {rhs} entries")]
    BandMismatch {
        /// Length of the sub-diagonal
        sub: usize,
        /// Length of the main diagonal
        diag: usize,
        /// Length of the super-diagonal
        sup: usize,
        /// Length of the right-hand side
        rhs: usize,
    },

    /// A pivot of the tri-diagonal elimination vanished.
    ///
    /// Usually the smoothing and weight parameters leave the system without a data term
    /// and without a penalty (for example `W = 0` with `λ = 0`).
    #[error("Tri-diagonal system is singular: pivot {pivot} at row {row}")]
    SingularSystem {
        /// Row of the offending pivot
        row: usize,
        /// Value of the offending pivot
        pivot: String,
    },

    /// The query x-coordinate is not inside any segment of the fitted spline.
    #[error("Point x = {x} lies outside the spline knots {start}..{end}")]
    PointOutOfRange {
        /// The queried x-coordinate
        x: String,
        /// First knot
        start: String,
        /// Last knot
        end: String,
    },

    /// A basis function outside of `{1, 2}` was requested.
    ///
    /// This is a programming error; the public fitting API never produces it.
    #[error("Unknown linear basis function index {0}")]
    UnknownBasisIndex(usize),

    /// The spline was evaluated before a successful fit.
    #[error("The spline has not been fitted")]
    NotFitted,

    /// A numeric value could not be cast to the target type. This is usually a custom type much smaller than f64/f32
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// Writing a report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A random distribution could not be built from the given parameters.
    #[error("Invalid distribution parameters: {0}")]
    Distribution(String),

    /// Drawing a plot failed.
    #[error("Failed to draw plot: {0}")]
    Plot(String),
}

/// Result type for smoothing spline operations
pub type Result<T> = std::result::Result<T, Error>;
