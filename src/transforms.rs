//! Utilities for generating and perturbing synthetic observations
//!
//! Data can be transformed by anything implementing the [`Transform`] trait, which applies the transformation over a set of values.
//!
//! The [`Transformable`] trait is a convenient wrapper that applies a transformation to the Y channel of an (X, Y) dataset.
//!
//! # Noise: [`NoiseTransform`] / [`ApplyNoise`]
//! - Gaussian noise: [`NoiseTransform::Normal`]
//!   - [`ApplyNoise::apply_normal_noise`] adds zero-mean Gaussian noise to the Y channel of an (X, Y) dataset
//!   - [`normal_samples`] draws a fresh set of normally distributed observations
//! - Uniform noise: [`NoiseTransform::Uniform`]
//!   - [`ApplyNoise::apply_uniform_noise`] adds it to the Y channel of an (X, Y) dataset
//!
//! ```rust
//! use smoothspline::transforms::{normal_samples, ApplyNoise};
//!
//! let samples = normal_samples(100, 0.94, 4.95, Some(7)).unwrap();
//! assert_eq!(samples, normal_samples(100, 0.94, 4.95, Some(7)).unwrap());
//!
//! let data: Vec<(f64, f64)> = (0..10).map(|i| (f64::from(i), 0.0)).collect();
//! let noisy = data.apply_uniform_noise(0.1, Some(7)).unwrap();
//! assert!(noisy.iter().all(|(_, y)| y.abs() <= 0.1));
//! ```
use crate::{error::Result, value::Value};

mod noise;
pub use noise::{normal_samples, ApplyNoise, NoiseTransform, NoiseValue};

pub use rand;
pub use rand_distr;

/// Trait for applying transformations to data.
pub trait Transform<T: Value> {
    /// Applies the transformation to the given data.
    ///
    /// # Errors
    /// Returns an error if the transformation cannot be built from its parameters.
    fn apply<'a>(&self, data: impl Iterator<Item = &'a mut T>) -> Result<()>;
}

/// Trait for transforming data.
pub trait Transformable<T: Value> {
    /// Transforms the data in place.
    ///
    /// # Errors
    /// Returns an error if the transformation cannot be built from its parameters.
    fn transform<R: Transform<T>>(&mut self, transform: &R) -> Result<()>;
}
impl<T: Value> Transformable<T> for Vec<(T, T)> {
    fn transform<R: Transform<T>>(&mut self, transform: &R) -> Result<()> {
        transform.apply(self.iter_mut().map(|(_, y)| y))
    }
}
