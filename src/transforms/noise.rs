use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

use crate::{
    error::{Error, Result},
    transforms::{Transform, Transformable},
    value::Value,
};

/// Values that random noise can be drawn in.
///
/// Implemented for every [`Value`] that `rand_distr` can sample normally and uniformly, which
/// includes `f32` and `f64`.
pub trait NoiseValue: Value + num_traits::Float + rand_distr::uniform::SampleUniform {}
impl<T> NoiseValue for T
where
    T: Value + num_traits::Float + rand_distr::uniform::SampleUniform,
    rand_distr::StandardNormal: Distribution<T>,
{
}

/// Types of noise based transforms for data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseTransform<T: Value> {
    /// Adds Gaussian noise to a signal or dataset.
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// ```math
    /// xₙ = x + εₙ
    /// where
    ///   εₙ ~ N(mean, stddev²), x = uncorrupted value
    /// ```
    /// </div>
    ///
    /// Applied to zeros, this draws plain normally distributed samples; see [`normal_samples`].
    Normal {
        /// Center of the distribution
        mean: T,

        /// Standard deviation (spread) of the distribution. Must be finite and non-negative.
        stddev: T,

        /// Fixes the RNG seed for reproducibility.
        /// If not provided, a system RNG will be used each run.
        seed: Option<u64>,
    },

    /// Adds uniform noise to a signal or dataset.
    ///
    /// Uniform noise is random variation drawn from a flat distribution where
    /// every value in the range has the same probability.
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// ```math
    /// xₙ = x + εₙ
    /// where
    ///   εₙ ~ U(−strength, +strength), x = uncorrupted value
    /// ```
    /// </div>
    Uniform {
        /// Controls the maximum deviation from the original value.
        /// Noise is sampled from the interval `[-strength, +strength)`
        strength: T,

        /// Fixes the RNG seed for reproducibility.
        /// If not provided, a system RNG will be used each run.
        seed: Option<u64>,
    },
}
impl<T: Value> NoiseTransform<T> {
    fn seed(&self) -> Option<u64> {
        match self {
            NoiseTransform::Normal { seed, .. } | NoiseTransform::Uniform { seed, .. } => *seed,
        }
    }

    fn rng(seed: Option<u64>) -> rand::rngs::SmallRng {
        match seed {
            Some(s) => rand::rngs::SmallRng::seed_from_u64(s),
            None => rand::rngs::SmallRng::from_rng(&mut rand::rng()),
        }
    }
}
impl<T: NoiseValue> Transform<T> for NoiseTransform<T>
where
    rand_distr::StandardNormal: Distribution<T>,
{
    fn apply<'a>(&self, data: impl Iterator<Item = &'a mut T>) -> Result<()> {
        let mut rng = Self::rng(self.seed());
        match self {
            NoiseTransform::Normal { mean, stddev, .. } => {
                // rand_distr only rejects a non-finite spread
                if *stddev < T::zero() {
                    return Err(Error::Distribution(format!(
                        "standard deviation {stddev} is negative"
                    )));
                }
                let gaussian =
                    Normal::new(*mean, *stddev).map_err(|e| Error::Distribution(e.to_string()))?;
                for v in data {
                    *v += gaussian.sample(&mut rng);
                }
            }

            NoiseTransform::Uniform { strength, .. } => {
                let strength = Value::abs(*strength);
                let uniform = Uniform::new(-strength, strength)
                    .map_err(|e| Error::Distribution(e.to_string()))?;
                for v in data {
                    *v += uniform.sample(&mut rng);
                }
            }
        }

        Ok(())
    }
}

/// Draws `n` samples from a normal distribution `N(mean, stddev²)`.
///
/// # Errors
/// Returns [`Error::Distribution`] if `stddev` is negative or not finite.
///
/// # Example
/// ```rust
/// # use smoothspline::transforms::normal_samples;
/// let samples = normal_samples(1731, 0.94, 4.95, Some(1)).unwrap();
/// assert_eq!(samples.len(), 1731);
/// ```
pub fn normal_samples<T: NoiseValue>(
    n: usize,
    mean: T,
    stddev: T,
    seed: Option<u64>,
) -> Result<Vec<T>>
where
    rand_distr::StandardNormal: Distribution<T>,
{
    let mut samples = vec![T::zero(); n];
    NoiseTransform::Normal { mean, stddev, seed }.apply(samples.iter_mut())?;
    Ok(samples)
}

/// Trait for applying noise to data.
pub trait ApplyNoise<T: Value>
where
    Self: Sized,
{
    /// Adds zero-mean Gaussian noise to the Y channel of a dataset.
    ///
    /// # Parameters
    /// - `stddev`: Standard deviation of the noise.
    /// - `seed` *(optional)*: Fixes the RNG seed for reproducibility.
    ///
    /// # Errors
    /// Returns [`Error::Distribution`] if `stddev` is negative or not finite.
    ///
    /// # Example
    /// ```rust
    /// # use smoothspline::transforms::ApplyNoise;
    /// let data = vec![(1.0, 2.0), (2.0, 3.0)];
    /// let noisy_data = data.apply_normal_noise(0.1, None).unwrap();
    /// ```
    fn apply_normal_noise(self, stddev: T, seed: Option<u64>) -> Result<Self>;

    /// Adds uniform noise in `[-strength, +strength)` to the Y channel of a dataset.
    ///
    /// # Errors
    /// Returns [`Error::Distribution`] if `strength` is zero or not finite.
    ///
    /// # Example
    /// ```rust
    /// # use smoothspline::transforms::ApplyNoise;
    /// let data = vec![(1.0, 2.0), (2.0, 3.0)];
    /// let noisy_data = data.apply_uniform_noise(0.05, None).unwrap();
    /// ```
    fn apply_uniform_noise(self, strength: T, seed: Option<u64>) -> Result<Self>;
}
impl<T: NoiseValue> ApplyNoise<T> for Vec<(T, T)>
where
    rand_distr::StandardNormal: Distribution<T>,
{
    fn apply_normal_noise(mut self, stddev: T, seed: Option<u64>) -> Result<Self> {
        self.transform(&NoiseTransform::Normal {
            mean: T::zero(),
            stddev,
            seed,
        })?;
        Ok(self)
    }

    fn apply_uniform_noise(mut self, strength: T, seed: Option<u64>) -> Result<Self> {
        self.transform(&NoiseTransform::Uniform { strength, seed })?;
        Ok(self)
    }
}
