//! Definition of the axis-aligned parallelotope.

use crate::math::{real, Point, Real, Vector};
use crate::query::Ray;
use crate::shape::parallelotope_shape::{
    axis, fmt_coords, intersect_slabs, slab_interval, RaySlab, SlabInterval,
};
use crate::shape::{ParallelotopeError, ParallelotopeShape};
use core::fmt;

/// A parallelotope whose edge `i` is aligned with the `i`-th coordinate axis.
///
/// This is an axis-aligned box described by its smallest corner and its strictly positive sizes.
/// It answers the same queries as [`Parallelotope`](crate::shape::Parallelotope) with
/// cheaper arithmetic: the facet normals are the coordinate axes.
///
/// # Example
///
/// ```
/// use hypertree::query::Ray;
/// use hypertree::shape::{ParallelotopeOrtho, ParallelotopeShape};
/// use nalgebra::{Point3, Vector3};
///
/// let cube = ParallelotopeOrtho::new(Point3::new(-0.5, -0.5, -0.5), Vector3::repeat(1.0)).unwrap();
/// let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::x());
///
/// let t: f64 = cube.intersect(&ray, 1.0e-12, 1.0e-12).unwrap();
/// assert!((t - 4.5).abs() < 1.0e-12);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParallelotopeOrtho<T: Real, const N: usize> {
    org: Point<T, N>,
    sizes: Vector<T, N>,
    // The box is `p[i] ≤ d1[i]` and `-p[i] ≤ d2[i]`.
    d1: Vector<T, N>,
    d2: Vector<T, N>,
}

impl<T: Real, const N: usize> ParallelotopeOrtho<T, N> {
    /// Creates an axis-aligned parallelotope from its smallest corner and its sizes.
    ///
    /// Fails if any size is not strictly positive.
    pub fn new(org: Point<T, N>, sizes: Vector<T, N>) -> Result<Self, ParallelotopeError> {
        if let Some(dimension) = sizes.iter().position(|size| !(*size > T::zero())) {
            return Err(ParallelotopeError::NonPositiveSize { dimension });
        }

        Ok(Self::new_unchecked(org, sizes))
    }

    /// Creates an axis-aligned parallelotope from its origin and its edge vectors.
    ///
    /// Edge `i` must only have a non-zero component along axis `i`, and this component must
    /// be positive.
    pub fn from_edges(
        org: Point<T, N>,
        edges: &[Vector<T, N>; N],
    ) -> Result<Self, ParallelotopeError> {
        for (i, edge) in edges.iter().enumerate() {
            if edge.iter().enumerate().any(|(j, c)| j != i && *c != T::zero()) {
                return Err(ParallelotopeError::NonOrthogonalEdge { edge: i });
            }
        }

        Self::new(org, Vector::from_fn(|i, _| edges[i][i]))
    }

    fn slabs<'a>(&'a self, ray: &'a Ray<T, N>) -> impl Iterator<Item = RaySlab<T>> + 'a {
        (0..N).map(move |i| RaySlab {
            s: ray.dir[i],
            d: ray.origin[i],
            d1: self.d1[i],
            d2: self.d2[i],
        })
    }

    fn new_unchecked(org: Point<T, N>, sizes: Vector<T, N>) -> Self {
        Self {
            org,
            sizes,
            d1: org.coords + sizes,
            d2: -org.coords,
        }
    }

    /// The sizes of this parallelotope along each axis.
    #[inline]
    pub fn sizes(&self) -> &Vector<T, N> {
        &self.sizes
    }

    /// The corner of this parallelotope with the largest coordinates.
    #[inline]
    pub fn max(&self) -> Point<T, N> {
        self.org + self.sizes
    }
}

impl<T: Real, const N: usize> ParallelotopeShape<T, N> for ParallelotopeOrtho<T, N> {
    fn from_corners(min: &Point<T, N>, max: &Point<T, N>) -> Result<Self, ParallelotopeError> {
        Self::new(*min, max - min)
    }

    #[inline]
    fn org(&self) -> Point<T, N> {
        self.org
    }

    #[inline]
    fn e(&self, i: usize) -> Vector<T, N> {
        axis(i, self.sizes[i])
    }

    fn inside(&self, point: &Point<T, N>) -> bool {
        (0..N).all(|i| point[i] <= self.d1[i] && -point[i] <= self.d2[i])
    }

    fn intersect(&self, ray: &Ray<T, N>, epsilon: T, intersection_threshold: T) -> Option<T> {
        intersect_slabs(self.slabs(ray), epsilon, intersection_threshold)
    }

    fn intersect_farthest(&self, ray: &Ray<T, N>, epsilon: T) -> Option<(T, Vector<T, N>)> {
        let SlabInterval { far, exit, .. } = slab_interval(self.slabs(ray), epsilon)?;
        let (i, through_d1) = exit?;
        let sign = if through_d1 { T::one() } else { -T::one() };
        Some((far, axis(i, sign)))
    }

    fn normal(&self, point: &Point<T, N>) -> Vector<T, N> {
        let mut best_distance = <T as num::Bounded>::max_value();
        let mut best_normal = Vector::zeros();

        for i in 0..N {
            let far = (point[i] - self.d1[i]).abs();
            if far < best_distance {
                best_distance = far;
                best_normal = axis(i, T::one());
            }

            let near = (-point[i] - self.d2[i]).abs();
            if near < best_distance {
                best_distance = near;
                best_normal = axis(i, -T::one());
            }
        }

        best_normal
    }

    fn binary_division(&self) -> Vec<Self> {
        let half_sizes = self.sizes * real::<T>(0.5);
        let mid = self.org.coords + half_sizes;

        // The outer facets of the children are the ones of the parent: the children
        // exactly tile the parent.
        (0..1usize << N)
            .map(|k| {
                let mut child = *self;
                child.sizes = half_sizes;
                for i in 0..N {
                    if k & (1 << i) != 0 {
                        child.org[i] = mid[i];
                        child.d2[i] = -mid[i];
                    } else {
                        child.d1[i] = mid[i];
                    }
                }
                child
            })
            .collect()
    }
}

impl<T: Real, const N: usize> fmt::Display for ParallelotopeOrtho<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "org = ")?;
        fmt_coords(f, self.org.iter())?;
        write!(f, "\nsizes = ")?;
        fmt_coords(f, self.sizes.iter())
    }
}
