//! Definition of the general parallelotope.

use crate::math::{real, Matrix, Point, Real, Vector};
use crate::query::Ray;
use crate::shape::parallelotope_shape::{
    axis, fmt_coords, intersect_slabs, slab_interval, RaySlab, SlabInterval,
};
use crate::shape::{ParallelotopeError, ParallelotopeShape};
use core::fmt;

/// The two hyperplanes bounding the slab of one edge direction.
///
/// The slab is `dot(p, n) ≤ d1` and `-dot(p, n) ≤ d2`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Planes<T: Real, const N: usize> {
    n: Vector<T, N>,
    d1: T,
    d2: T,
}

impl<T: Real, const N: usize> Planes<T, N> {
    fn new(n: Vector<T, N>, org: &Point<T, N>, edge: &Vector<T, N>) -> Self {
        Self {
            n,
            d1: (org + edge).coords.dot(&n),
            d2: -org.coords.dot(&n),
        }
    }
}

/// A parallelotope with arbitrary, linearly independent, edges.
///
/// Each pair of opposite facets is stored as a unit normal and two offsets. The normal of the
/// facets bounding edge `e(i)` is orthogonal to every other edge and oriented along `e(i)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Parallelotope<T: Real, const N: usize> {
    org: Point<T, N>,
    edges: [Vector<T, N>; N],
    planes: [Planes<T, N>; N],
}

impl<T: Real, const N: usize> Parallelotope<T, N> {
    /// Creates a parallelotope from its origin vertex and its `N` edge vectors.
    ///
    /// Fails if the edges are linearly dependent.
    ///
    /// # Example
    ///
    /// ```
    /// use hypertree::shape::{Parallelotope, ParallelotopeShape};
    /// use nalgebra::{Point2, Vector2};
    ///
    /// // A rhombus.
    /// let p = Parallelotope::new(
    ///     Point2::origin(),
    ///     [Vector2::new(2.0, 0.0), Vector2::new(1.0, 1.0)],
    /// )
    /// .unwrap();
    ///
    /// assert!(p.inside(&Point2::new(2.5, 0.9)));
    /// assert!(!p.inside(&Point2::new(0.5, 0.9)));
    /// ```
    pub fn new(org: Point<T, N>, edges: [Vector<T, N>; N]) -> Result<Self, ParallelotopeError> {
        let inverse = Matrix::<T, N>::from_columns(&edges)
            .try_inverse()
            .ok_or(ParallelotopeError::DegenerateEdges)?;

        // The rows of the inverse are the dual basis: row `i` is orthogonal to every edge
        // except `e(i)`.
        let mut normals = [Vector::zeros(); N];
        for (i, normal) in normals.iter_mut().enumerate() {
            let n = inverse
                .row(i)
                .transpose()
                .try_normalize(T::zero())
                .ok_or(ParallelotopeError::DegenerateEdges)?;

            *normal = if n.dot(&edges[i]) < T::zero() { -n } else { n };
        }

        Ok(Self::with_normals(org, edges, &normals))
    }

    fn with_normals(
        org: Point<T, N>,
        edges: [Vector<T, N>; N],
        normals: &[Vector<T, N>; N],
    ) -> Self {
        let planes = core::array::from_fn(|i| Planes::new(normals[i], &org, &edges[i]));
        Self { org, edges, planes }
    }

    fn slabs<'a>(&'a self, ray: &'a Ray<T, N>) -> impl Iterator<Item = RaySlab<T>> + 'a {
        self.planes.iter().map(move |plane| RaySlab {
            s: ray.dir.dot(&plane.n),
            d: ray.origin.coords.dot(&plane.n),
            d1: plane.d1,
            d2: plane.d2,
        })
    }

    /// The `N` edge vectors.
    #[inline]
    pub fn edges(&self) -> &[Vector<T, N>; N] {
        &self.edges
    }
}

impl<T: Real, const N: usize> ParallelotopeShape<T, N> for Parallelotope<T, N> {
    fn from_corners(min: &Point<T, N>, max: &Point<T, N>) -> Result<Self, ParallelotopeError> {
        let edges = core::array::from_fn(|i| axis(i, max[i] - min[i]));
        Self::new(*min, edges)
    }

    #[inline]
    fn org(&self) -> Point<T, N> {
        self.org
    }

    #[inline]
    fn e(&self, i: usize) -> Vector<T, N> {
        self.edges[i]
    }

    fn inside(&self, point: &Point<T, N>) -> bool {
        self.planes.iter().all(|plane| {
            let d = point.coords.dot(&plane.n);
            d <= plane.d1 && -d <= plane.d2
        })
    }

    fn intersect(&self, ray: &Ray<T, N>, epsilon: T, intersection_threshold: T) -> Option<T> {
        intersect_slabs(self.slabs(ray), epsilon, intersection_threshold)
    }

    fn intersect_farthest(&self, ray: &Ray<T, N>, epsilon: T) -> Option<(T, Vector<T, N>)> {
        let SlabInterval { far, exit, .. } = slab_interval(self.slabs(ray), epsilon)?;
        let (i, through_d1) = exit?;
        let n = self.planes[i].n;
        Some((far, if through_d1 { n } else { -n }))
    }

    fn normal(&self, point: &Point<T, N>) -> Vector<T, N> {
        let mut best_distance = <T as num::Bounded>::max_value();
        let mut best_normal = Vector::zeros();

        for plane in &self.planes {
            let d = point.coords.dot(&plane.n);

            let far = (d - plane.d1).abs();
            if far < best_distance {
                best_distance = far;
                best_normal = plane.n;
            }

            let near = (-d - plane.d2).abs();
            if near < best_distance {
                best_distance = near;
                best_normal = -plane.n;
            }
        }

        best_normal
    }

    fn binary_division(&self) -> Vec<Self> {
        let half_edges = self.edges.map(|e| e * real::<T>(0.5));
        let mid: [T; N] = core::array::from_fn(|i| {
            (self.org + half_edges[i]).coords.dot(&self.planes[i].n)
        });

        // The outer facets of the children are the ones of the parent: the children
        // exactly tile the parent.
        (0..1usize << N)
            .map(|k| {
                let mut child = *self;
                child.edges = half_edges;
                for i in 0..N {
                    if k & (1 << i) != 0 {
                        child.org += half_edges[i];
                        child.planes[i].d2 = -mid[i];
                    } else {
                        child.planes[i].d1 = mid[i];
                    }
                }
                child
            })
            .collect()
    }
}

impl<T: Real, const N: usize> fmt::Display for Parallelotope<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "org = ")?;
        fmt_coords(f, self.org.iter())?;
        for (i, e) in self.edges.iter().enumerate() {
            write!(f, "\nedge[{}] = ", i)?;
            fmt_coords(f, e.iter())?;
        }
        Ok(())
    }
}
