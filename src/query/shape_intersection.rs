use crate::math::{Point, Real, Vector};
use crate::query::Ray;

/// An edge of a convex shape, given as one of its end vertices and the vector to the other end.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexRidge<T: Real, const N: usize> {
    /// The vertex the edge starts from.
    pub vertex: Point<T, N>,
    /// The vector from `vertex` to the other end of the edge.
    pub edge: Vector<T, N>,
}

impl<T: Real, const N: usize> VertexRidge<T, N> {
    /// Creates a ridge starting at `vertex` and spanning `edge`.
    #[inline]
    pub fn new(vertex: Point<T, N>, edge: Vector<T, N>) -> Self {
        Self { vertex, edge }
    }
}

/// Point containment for convex shapes whose topological dimension is the dimension of the space.
pub trait SolidShape<T: Real, const N: usize> {
    /// Is `point` inside this shape or on its boundary?
    fn inside(&self, point: &Point<T, N>) -> bool;
}

/// The view of a convex shape needed to test it for intersection with another convex shape.
///
/// Full-dimensional shapes (boxes, simplices of the space dimension, ...) expose
/// point containment through [`ShapeView::solid`]. Lower-dimensional shapes, like the
/// facets of a mesh, keep the default implementation returning `None` and are only
/// tested through their vertices and edges.
pub trait ShapeView<T: Real, const N: usize> {
    /// The vertices of the shape.
    fn vertices(&self) -> &[Point<T, N>];

    /// The edges of the shape, each one listed once.
    fn vertex_ridges(&self) -> &[VertexRidge<T, N>];

    /// The ray parameter of the first intersection of `ray` with this shape.
    ///
    /// For a ray starting inside a solid shape this is the parameter where the ray leaves it.
    fn intersect(&self, ray: &Ray<T, N>) -> Option<T>;

    /// Point containment, if this shape spans the whole space.
    fn solid(&self) -> Option<&dyn SolidShape<T, N>> {
        None
    }
}

fn shapes_intersect_by_vertices<T, const N: usize, S1, S2>(shape_1: &S1, shape_2: &S2) -> bool
where
    T: Real,
    S1: ShapeView<T, N> + ?Sized,
    S2: ShapeView<T, N> + ?Sized,
{
    if let Some(solid_2) = shape_2.solid() {
        if shape_1.vertices().iter().any(|v| solid_2.inside(v)) {
            return true;
        }
    }

    if let Some(solid_1) = shape_1.solid() {
        if shape_2.vertices().iter().any(|v| solid_1.inside(v)) {
            return true;
        }
    }

    false
}

/// Does the segment from `org` to `org + direction` cross `shape`?
///
/// The crossing must happen strictly before the end of the segment.
pub fn line_segment_intersects_shape<T, const N: usize, S>(
    org: &Point<T, N>,
    direction: &Vector<T, N>,
    shape: &S,
) -> bool
where
    T: Real,
    S: ShapeView<T, N> + ?Sized,
{
    let Some(dir) = direction.try_normalize(T::zero()) else {
        return false;
    };

    let ray = Ray::new(*org, dir);
    shape
        .intersect(&ray)
        .is_some_and(|alpha| alpha * alpha < direction.norm_squared())
}

fn shapes_intersect_by_vertex_ridges<T, const N: usize, S1, S2>(shape_1: &S1, shape_2: &S2) -> bool
where
    T: Real,
    S1: ShapeView<T, N> + ?Sized,
    S2: ShapeView<T, N> + ?Sized,
{
    for ridge in shape_1.vertex_ridges() {
        if line_segment_intersects_shape(&ridge.vertex, &ridge.edge, shape_2) {
            return true;
        }
    }

    for ridge in shape_2.vertex_ridges() {
        if line_segment_intersects_shape(&ridge.vertex, &ridge.edge, shape_1) {
            return true;
        }
    }

    false
}

/// Tests if two convex shapes intersect.
///
/// The shapes intersect if any vertex of one shape is inside the other one (for shapes
/// that are solid), or if any edge of one shape crosses the other one. Degenerate
/// configurations, like two coinciding shapes with no vertex strictly crossing, are not
/// handled specially.
///
/// # Example
///
/// ```rust
/// use hypertree::query::shape_intersection;
/// use hypertree::shape::{ParallelotopeOrtho, ParallelotopeWrapper};
/// use nalgebra::{Point2, Vector2};
///
/// let a = ParallelotopeOrtho::new(Point2::new(0.0, 0.0), Vector2::new(2.0, 2.0)).unwrap();
/// let b = ParallelotopeOrtho::new(Point2::new(1.0, 1.0), Vector2::new(2.0, 2.0)).unwrap();
/// let c = ParallelotopeOrtho::new(Point2::new(5.0, 5.0), Vector2::new(1.0, 1.0)).unwrap();
///
/// let a = ParallelotopeWrapper::new(a);
/// assert!(shape_intersection(&a, &ParallelotopeWrapper::new(b)));
/// assert!(!shape_intersection(&a, &ParallelotopeWrapper::new(c)));
/// ```
pub fn shape_intersection<T, const N: usize, S1, S2>(shape_1: &S1, shape_2: &S2) -> bool
where
    T: Real,
    S1: ShapeView<T, N> + ?Sized,
    S2: ShapeView<T, N> + ?Sized,
{
    shapes_intersect_by_vertices(shape_1, shape_2)
        || shapes_intersect_by_vertex_ridges(shape_1, shape_2)
}
