//! # Smoothspline
//! ## Smooth noisy 1-D data with a single tri-diagonal solve
//!
//! Noisy measurements rarely want to be interpolated exactly, and a global polynomial fit will happily
//! wiggle between them. A smoothing spline sits between the two: it keeps one value per observation,
//! but pays a penalty for every change of slope between neighbouring segments.
//!
//! This library provides:
//! - A [`SmoothingSpline`] over a piecewise-linear nodal basis, fitted with one `O(n)` solve
//! - Evaluation of the value and slope anywhere within the knots
//! - Fit diagnostics and descriptive statistics ([`statistics`], [`SmoothingSpline::properties`])
//! - CSV and Markdown reports comparing several smoothing strengths ([`report`])
//! - Synthetic data generation (`transforms` feature)
//! - Test assertions that plot the data and the fitted spline on failure (`plotting` feature)
//!
//! The simplest use-case is to smooth a set of evenly spaced observations:
//! ```rust
//! use smoothspline::{Point, SmoothingSpline, Spline};
//!
//! let knots: Vec<Point> = (0..6).map(|i| Point::on_axis(f64::from(i))).collect();
//! let values = [0.0, 2.0, -1.0, 4.0, 3.0, 0.5];
//!
//! let mut spline = SmoothingSpline::new(0.5, 1.0);
//! spline.fit(&knots, &values).expect("Failed to fit");
//!
//! let at = spline.evaluate(&Point::on_axis(2.5)).expect("Out of range");
//! println!("y(2.5) = {}, y'(2.5) = {}", at.value, at.derivative);
//! ```
//!
//! # Core Concepts
//! - A [`Point`] is a sample location. Only its `x` coordinate takes part in fitting.
//! - A **knot** is a point at which an observation was made. Consecutive knots bound a **segment**.
//! - The **smoothing parameter** `λ` (`smooth`) trades fidelity for smoothness:
//!     - `λ = 0` passes through every observation
//!     - `λ → 1` flattens the spline towards a single line. `λ = 1` has no data term and cannot be solved
//! - The **weight** `W` scales every observation equally. It only matters relative to `λ`.
//!
//! # Implementation Details
//!
//! Each segment maps to the canonical interval `[-1, 1]` ([`basis::MasterElement`]) carrying two linear
//! basis functions ([`basis::LinearBasis`]). Their contributions accumulate into a
//! [`tridiagonal::TridiagonalSystem`] solved by Thomas' algorithm. `nalgebra` supplies the numeric traits
//! behind [`value::Value`], so the engine runs in `f32` as well as the default `f64`.
//!
//! # Testing utilities
//!
//! This crate includes a set of assertions for validating spline fits. See [`test`].
//!
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // Index loops read closer to the band equations
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod test;

#[cfg(feature = "plotting")]
#[cfg_attr(docsrs, doc(cfg(feature = "plotting")))]
pub mod plot;

#[cfg(feature = "transforms")]
#[cfg_attr(docsrs, doc(cfg(feature = "transforms")))]
pub mod transforms;

pub mod basis;
pub mod error;
pub mod report;
pub mod statistics;
pub mod tridiagonal;
pub mod value;

mod point;
mod spline;

pub use point::Point;
pub use spline::*;

pub use nalgebra;
