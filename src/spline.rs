use std::ops::RangeInclusive;

use crate::{
    basis::{LinearBasis, MasterElement},
    error::{Error, Result},
    point::Point,
    statistics,
    tridiagonal::TridiagonalSystem,
    value::{SteppedValues, Value},
};

/// Smallest knot spacing accepted by [`SmoothingSpline::fit`]
pub const MIN_SEGMENT_WIDTH: f64 = 1e-10;

/// Distance from a knot within which a query still belongs to the segment
pub const KNOT_TOLERANCE: f64 = 1e-7;

/// Result of evaluating a spline at a point.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Evaluation<T: Value = f64> {
    /// Value of the spline
    pub value: T,

    /// First derivative with respect to `x`
    pub derivative: T,

    /// Second derivative; always zero for a piecewise-linear spline
    pub curvature: T,
}
impl<T: Value> Evaluation<T> {
    /// The evaluation as `[value, derivative, curvature]`
    pub fn to_array(self) -> [T; 3] {
        [self.value, self.derivative, self.curvature]
    }
}

/// A spline that can be rebuilt from observations and evaluated at query points.
///
/// Fitting takes `&mut self` and evaluation `&self`, so a fitted spline can be shared
/// between readers while refits stay exclusive.
pub trait Spline<T: Value> {
    /// Builds (or rebuilds) the spline from knots and the value observed at each knot.
    ///
    /// # Errors
    /// Returns an error if the input is invalid or the system cannot be solved.
    /// On error, any previous fit is left in place.
    fn fit(&mut self, points: &[Point<T>], values: &[T]) -> Result<()>;

    /// Evaluates the spline at `query`.
    ///
    /// # Errors
    /// Returns an error if the spline is not fitted or `query` lies outside the knots.
    fn evaluate(&self, query: &Point<T>) -> Result<Evaluation<T>>;
}

/// A 1-D smoothing spline over a piecewise-linear nodal basis.
///
/// The spline holds one coefficient per knot. Fitting minimizes a blend of
/// a weighted least-squares data term and a roughness penalty on the slopes:
///
/// <div class="warning">
///
/// **Technical Details**
///
/// For every segment `[x_i, x_{i+1}]` of width `h`, both endpoint observations
/// `(x, f)` contribute to a symmetric tri-diagonal system:
///
/// ```math
/// A_jk += (1 − λ) · W · B_j(ξ) · B_k(ξ)
/// d_j  += (1 − λ) · W · B_j(ξ) · f
/// ```
///
/// and the segment adds a roughness penalty of `λ / h` to both diagonal entries and
/// subtracts it from the coupling between them. The system is solved with
/// Thomas' algorithm.
///
/// Note the convention: `λ` scales the **penalty** and `(1 − λ)` the **data**.
/// - `λ = 0` reproduces the observations at the knots exactly.
/// - `λ → 1` flattens the spline toward a constant.
/// </div>
///
/// # Example
/// ```
/// # use smoothspline::{Point, SmoothingSpline, Spline};
/// let knots: Vec<Point> = (0..4).map(|i| Point::on_axis(i as f64)).collect();
/// let values = [0.0, 1.0, 0.0, -1.0];
///
/// let mut spline = SmoothingSpline::new(0.0, 1.0);
/// spline.fit(&knots, &values).unwrap();
///
/// let at = spline.evaluate(&Point::on_axis(1.5)).unwrap();
/// assert!((at.value - 0.5).abs() < 1e-12);
/// assert!((at.derivative + 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingSpline<T: Value = f64> {
    smooth: T,
    weight: T,
    knots: Vec<Point<T>>,
    alpha: Vec<T>,
}
impl<T: Value> SmoothingSpline<T> {
    /// Creates an unfitted spline with smoothing parameter `smooth` (λ) and
    /// observation weight `weight` (W).
    ///
    /// No validation or computation happens here; `λ` is intended to lie in `[0, 1]`.
    pub fn new(smooth: T, weight: T) -> Self {
        Self {
            smooth,
            weight,
            knots: Vec::new(),
            alpha: Vec::new(),
        }
    }

    /// Creates a spline and fits it in one go.
    ///
    /// # Errors
    /// See [`Spline::fit`].
    pub fn fitted(smooth: T, weight: T, points: &[Point<T>], values: &[T]) -> Result<Self> {
        let mut spline = Self::new(smooth, weight);
        spline.fit(points, values)?;
        Ok(spline)
    }

    /// Creates a spline from `(x, y)` pairs, placing knots on the x axis.
    ///
    /// # Errors
    /// See [`Spline::fit`].
    pub fn from_data(smooth: T, weight: T, data: &[(T, T)]) -> Result<Self> {
        let points: Vec<_> = data.iter().map(|&(x, _)| Point::on_axis(x)).collect();
        let values: Vec<_> = data.iter().map(|&(_, y)| y).collect();
        Self::fitted(smooth, weight, &points, &values)
    }

    /// The smoothing parameter λ
    pub fn smooth(&self) -> T {
        self.smooth
    }

    /// The observation weight W
    pub fn weight(&self) -> T {
        self.weight
    }

    /// The knots of the current fit; empty before the first fit
    pub fn knots(&self) -> &[Point<T>] {
        &self.knots
    }

    /// The nodal coefficients of the current fit, one per knot
    pub fn coefficients(&self) -> &[T] {
        &self.alpha
    }

    /// True once a fit has succeeded
    pub fn is_fitted(&self) -> bool {
        !self.alpha.is_empty()
    }

    /// Number of segments between knots
    pub fn segment_count(&self) -> usize {
        self.knots.len().saturating_sub(1)
    }

    /// The x range covered by the knots
    ///
    /// # Errors
    /// Returns [`Error::NotFitted`] before the first fit.
    pub fn x_range(&self) -> Result<RangeInclusive<T>> {
        match (self.knots.first(), self.knots.last()) {
            (Some(first), Some(last)) => Ok(first.x()..=last.x()),
            _ => Err(Error::NotFitted),
        }
    }

    /// Checks knot and value counts and the width of every segment
    fn validate(points: &[Point<T>], values: &[T]) -> Result<()> {
        if points.len() != values.len() || points.len() < 2 {
            return Err(Error::InvalidInput {
                points: points.len(),
                values: values.len(),
            });
        }

        let min_width = T::try_cast(MIN_SEGMENT_WIDTH)?;
        for (index, pair) in points.windows(2).enumerate() {
            let width = pair[1].x() - pair[0].x();
            if num_traits::float::FloatCore::is_nan(width) || width < min_width {
                return Err(Error::DegenerateSegment {
                    index,
                    width: format!("{width:e}"),
                });
            }
        }

        Ok(())
    }

    /// Adds the data term of one observation `(x, value)` on `segment` to the system
    fn assemble_observation(
        &self,
        segment: usize,
        element: &MasterElement<T>,
        x: T,
        value: T,
        system: &mut TridiagonalSystem<T>,
    ) {
        let scale = (T::one() - self.smooth) * self.weight;
        let xi = element.to_canonical(x);
        let f1 = LinearBasis::Falling.value(xi);
        let f2 = LinearBasis::Rising.value(xi);

        system.add_diagonal(segment, scale * f1 * f1);
        system.add_diagonal(segment + 1, scale * f2 * f2);
        system.add_coupling(segment, scale * f1 * f2);
        system.add_rhs(segment, scale * f1 * value);
        system.add_rhs(segment + 1, scale * f2 * value);
    }

    /// Adds the roughness penalty `λ / h` of `segment` to the system
    fn assemble_penalty(
        &self,
        segment: usize,
        element: &MasterElement<T>,
        system: &mut TridiagonalSystem<T>,
    ) {
        let penalty = self.smooth / element.width();
        system.add_diagonal(segment, penalty);
        system.add_diagonal(segment + 1, penalty);
        system.add_coupling(segment, -penalty);
    }

    /// Finds the first segment containing `x`, with [`KNOT_TOLERANCE`] at the knots
    fn locate(&self, x: T) -> Result<usize> {
        let eps = T::try_cast(KNOT_TOLERANCE)?;
        self.knots
            .windows(2)
            .position(|pair| {
                let (start, end) = (pair[0].x(), pair[1].x());
                (x > start && x < end)
                    || Value::abs_sub(x, start) < eps
                    || Value::abs_sub(x, end) < eps
            })
            .ok_or_else(|| {
                let (start, end) = match (self.knots.first(), self.knots.last()) {
                    (Some(first), Some(last)) => (first.x(), last.x()),
                    _ => (T::nan(), T::nan()),
                };
                Error::PointOutOfRange {
                    x: x.to_string(),
                    start: start.to_string(),
                    end: end.to_string(),
                }
            })
    }

    /// Evaluates the spline value at `x`.
    ///
    /// # Errors
    /// See [`Spline::evaluate`].
    pub fn y(&self, x: T) -> Result<T> {
        Ok(self.evaluate(&Point::on_axis(x))?.value)
    }

    /// Evaluates the spline at each of the given x values.
    ///
    /// # Errors
    /// Returns an error if any x lies outside the knots.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Result<Vec<(T, T)>> {
        x.into_iter().map(|x| Ok((x, self.y(x)?))).collect()
    }

    /// Evaluates the spline over a range with a fixed step.
    ///
    /// # Errors
    /// Returns an error if the range extends beyond the knots.
    pub fn solve_range(&self, range: RangeInclusive<T>, step: T) -> Result<Vec<(T, T)>> {
        self.solve(SteppedValues::new(range, step))
    }

    /// The value of the spline at every knot: the smoothed observations.
    ///
    /// In the nodal basis these are exactly the coefficients. Empty before the first fit.
    pub fn solution(&self) -> Vec<T> {
        self.alpha.clone()
    }

    /// Differences between the observations a spline was fitted to and the spline at each knot.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if `values` does not have one entry per knot,
    /// or [`Error::NotFitted`] before the first fit.
    pub fn residuals(&self, values: &[T]) -> Result<Vec<T>> {
        if !self.is_fitted() {
            return Err(Error::NotFitted);
        }
        if values.len() != self.knots.len() {
            return Err(Error::InvalidInput {
                points: self.knots.len(),
                values: values.len(),
            });
        }

        Ok(values
            .iter()
            .zip(self.solution())
            .map(|(y, y_fit)| *y - y_fit)
            .collect())
    }

    /// Summary of the fit against the observations it was built from.
    ///
    /// # Errors
    /// Same as [`SmoothingSpline::residuals`].
    pub fn properties(&self, values: &[T]) -> Result<SplineProperties<T>> {
        let residuals = self.residuals(values)?;
        let y_fit = self.solution();

        Ok(SplineProperties {
            knots: self.knots.len(),
            smooth: self.smooth,
            weight: self.weight,
            coefficients: self.alpha.clone(),
            mse: statistics::mean_squared_error(values.iter().copied(), y_fit.iter().copied()),
            rmse: statistics::root_mean_squared_error(
                values.iter().copied(),
                y_fit.iter().copied(),
            ),
            mae: statistics::mean_absolute_error(values.iter().copied(), y_fit.iter().copied()),
            r_squared: statistics::r_squared(values.iter().copied(), y_fit.into_iter()),
            max_residual: residuals
                .into_iter()
                .map(Value::abs)
                .fold(T::zero(), nalgebra::RealField::max),
        })
    }
}
impl<T: Value> Spline<T> for SmoothingSpline<T> {
    fn fit(&mut self, points: &[Point<T>], values: &[T]) -> Result<()> {
        Self::validate(points, values)?;
        log::debug!(
            "fitting smoothing spline: {} knots, smooth = {}, weight = {}",
            points.len(),
            self.smooth,
            self.weight
        );

        let mut system = TridiagonalSystem::zeros(points.len());
        for (segment, pair) in points.windows(2).enumerate() {
            let element = MasterElement::new(pair[0].x(), pair[1].x());
            self.assemble_observation(segment, &element, pair[0].x(), values[segment], &mut system);
            self.assemble_observation(
                segment,
                &element,
                pair[1].x(),
                values[segment + 1],
                &mut system,
            );
            self.assemble_penalty(segment, &element, &mut system);
        }

        let alpha = system.solve()?;
        self.knots = points.to_vec();
        self.alpha = alpha;
        Ok(())
    }

    fn evaluate(&self, query: &Point<T>) -> Result<Evaluation<T>> {
        if !self.is_fitted() {
            return Err(Error::NotFitted);
        }

        let x = query.x();
        let i = self.locate(x)?;
        let element = MasterElement::new(self.knots[i].x(), self.knots[i + 1].x());
        let xi = element.to_canonical(x);
        let (left, right) = (self.alpha[i], self.alpha[i + 1]);

        let value = left * LinearBasis::Falling.value(xi) + right * LinearBasis::Rising.value(xi);
        let derivative = (left * LinearBasis::Falling.derivative::<T>()
            + right * LinearBasis::Rising.derivative::<T>())
            * element.jacobian();

        Ok(Evaluation {
            value,
            derivative,
            curvature: T::zero(),
        })
    }
}

/// A set of diagnostic properties for a fitted spline.
///
/// Can be serialized to JSON or other formats.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct SplineProperties<T: Value> {
    /// Number of knots
    pub knots: usize,

    /// Smoothing parameter λ
    pub smooth: T,

    /// Observation weight W
    pub weight: T,

    /// Nodal coefficients of the fit
    pub coefficients: Vec<T>,

    /// Mean squared error against the observations
    pub mse: T,

    /// Root mean squared error against the observations
    pub rmse: T,

    /// Mean absolute error against the observations
    pub mae: T,

    /// R² against the observations
    pub r_squared: T,

    /// Largest absolute residual
    pub max_residual: T,
}
