use crate::math::{Point, Real};
use crate::query::{Ray, ShapeView, SolidShape, Tolerances, VertexRidge};
use crate::shape::{parallelotope_algorithm, ParallelotopeShape};

/// A parallelotope seen as a convex shape for [`shape_intersection`](crate::query::shape_intersection).
///
/// The vertices and the edges are computed once, at construction. Ray casts use the
/// tolerances given at construction.
#[derive(Clone, Debug)]
pub struct ParallelotopeWrapper<T: Real, const N: usize, P> {
    parallelotope: P,
    vertices: Vec<Point<T, N>>,
    vertex_ridges: Vec<VertexRidge<T, N>>,
    tolerances: Tolerances<T>,
}

impl<T: Real, const N: usize, P: ParallelotopeShape<T, N>> ParallelotopeWrapper<T, N, P> {
    /// Wraps `parallelotope`, casting rays with the default tolerances.
    pub fn new(parallelotope: P) -> Self {
        Self::with_tolerances(parallelotope, Tolerances::default())
    }

    /// Wraps `parallelotope`, casting rays with the given tolerances.
    pub fn with_tolerances(parallelotope: P, tolerances: Tolerances<T>) -> Self {
        Self {
            vertices: parallelotope_algorithm::vertices(&parallelotope),
            vertex_ridges: parallelotope_algorithm::vertex_ridges(&parallelotope),
            parallelotope,
            tolerances,
        }
    }

    /// The wrapped parallelotope.
    #[inline]
    pub fn parallelotope(&self) -> &P {
        &self.parallelotope
    }

    /// Unwraps the parallelotope.
    #[inline]
    pub fn into_inner(self) -> P {
        self.parallelotope
    }
}

impl<T: Real, const N: usize, P: ParallelotopeShape<T, N>> ShapeView<T, N>
    for ParallelotopeWrapper<T, N, P>
{
    #[inline]
    fn vertices(&self) -> &[Point<T, N>] {
        &self.vertices
    }

    #[inline]
    fn vertex_ridges(&self) -> &[VertexRidge<T, N>] {
        &self.vertex_ridges
    }

    #[inline]
    fn intersect(&self, ray: &Ray<T, N>) -> Option<T> {
        self.parallelotope.intersect(
            ray,
            self.tolerances.epsilon,
            self.tolerances.intersection_threshold,
        )
    }

    #[inline]
    fn solid(&self) -> Option<&dyn SolidShape<T, N>> {
        Some(self)
    }
}

impl<T: Real, const N: usize, P: ParallelotopeShape<T, N>> SolidShape<T, N>
    for ParallelotopeWrapper<T, N, P>
{
    #[inline]
    fn inside(&self, point: &Point<T, N>) -> bool {
        self.parallelotope.inside(point)
    }
}
