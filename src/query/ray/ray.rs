//! Structure needed to cast rays.

use crate::math::{Point, Real, Vector};

/// A ray for ray-casting queries.
///
/// A ray is a half-infinite line starting at an origin point and extending
/// infinitely in a direction.
///
/// # Direction Vector
///
/// The direction can be any non-zero vector:
/// - **Normalized**: `dir` with length 1.0 gives ray parameters in world units
/// - **Not normalized**: ray parameters are scaled by `dir.norm()`
///
/// # Example
///
/// ```rust
/// use hypertree::query::Ray;
/// use nalgebra::{Point3, Vector3};
///
/// let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
///
/// assert_eq!(ray.point_at(4.5), Point3::new(-0.5, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray<T: Real, const N: usize> {
    /// Starting point of the ray.
    ///
    /// Points along the ray are computed as `origin + dir * t` for `t ≥ 0`.
    pub origin: Point<T, N>,

    /// Direction vector of the ray.
    ///
    /// It does NOT need to be normalized.
    pub dir: Vector<T, N>,
}

impl<T: Real, const N: usize> Ray<T, N> {
    /// Creates a new ray from an origin point and direction vector.
    #[inline]
    pub fn new(origin: Point<T, N>, dir: Vector<T, N>) -> Self {
        Ray { origin, dir }
    }

    /// Returns a copy of this ray starting at `origin`, with the same direction.
    #[inline]
    pub fn with_origin(&self, origin: Point<T, N>) -> Self {
        Self::new(origin, self.dir)
    }

    /// Computes a point along the ray at parameter `t`.
    ///
    /// Returns `origin + dir * t`.
    #[inline]
    pub fn point_at(&self, t: T) -> Point<T, N> {
        self.origin + self.dir * t
    }
}
