//! Sample point locations
use crate::value::Value;

/// An immutable location in 3-space.
///
/// Only the `x` coordinate takes part in 1-D spline fitting; `y` and `z` are
/// carried along so callers can keep richer observation locations.
///
/// ```rust
/// # use smoothspline::Point;
/// let p = Point::new(1.0, 2.0, 3.0);
/// assert_eq!(p.x(), 1.0);
/// assert_eq!(Point::on_axis(4.0), Point::new(4.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point<T: Value = f64> {
    x: T,
    y: T,
    z: T,
}
impl<T: Value> Point<T> {
    /// Creates a point from its three coordinates
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a point on the x axis (`y = z = 0`)
    pub fn on_axis(x: T) -> Self {
        Self::new(x, T::zero(), T::zero())
    }

    /// The x coordinate
    pub fn x(&self) -> T {
        self.x
    }

    /// The y coordinate
    pub fn y(&self) -> T {
        self.y
    }

    /// The z coordinate
    pub fn z(&self) -> T {
        self.z
    }
}
impl<T: Value> Default for Point<T> {
    fn default() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }
}
impl<T: Value> From<T> for Point<T> {
    fn from(x: T) -> Self {
        Self::on_axis(x)
    }
}
impl<T: Value> From<(T, T, T)> for Point<T> {
    fn from((x, y, z): (T, T, T)) -> Self {
        Self::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_origin() {
        let p: Point = Point::default();
        assert_eq!((p.x(), p.y(), p.z()), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_value_semantics() {
        let a = Point::new(1.0, -2.0, 0.5);
        let mut b = a;
        assert_eq!(a, b);

        b = Point::from((1.0, -2.0, 0.75));
        assert_ne!(a, b);
        assert_eq!(a.z(), 0.5);
    }

    #[test]
    fn test_serde() {
        let p = Point::new(1.5, 0.0, -1.0);
        let json = serde_json::to_string(&p).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
