use super::TreeBox;
use crate::math::{Point, Real};
use crate::query::Tolerances;
use crate::shape::{ParallelotopeOrtho, ParallelotopeShape};
use core::ops::RangeInclusive;

/// The valid values of the maximum depth of a [`SpatialSubdivisionTree`].
pub const MAX_DEPTH_BOUNDS: RangeInclusive<usize> = 1..=10;

/// The valid values of the minimum object count per box of a [`SpatialSubdivisionTree`].
pub const MIN_OBJECTS_PER_BOX_BOUNDS: RangeInclusive<usize> = 1..=100;

/// A spatial subdivision tree: each box of the tree is split into its `2^N` halves until
/// it intersects few enough objects.
///
/// This is a binary tree in 1D, a quadtree in 2D, an octree in 3D, and so on. The tree is
/// built once, in parallel, for a static set of convex objects with
/// [`SpatialSubdivisionTree::decompose`], and is then used to find, along a ray, the
/// objects that may intersect it with [`SpatialSubdivisionTree::trace_ray`].
///
/// The boxes are stored in a flat array in which the root is the box at index 0 and the
/// `2^N` children of a box have consecutive indices.
///
/// # Example
///
/// ```
/// use hypertree::partitioning::SpatialSubdivisionTree;
/// use hypertree::query::{Ray, ShapeView};
/// use hypertree::shape::{ParallelotopeOrtho, ParallelotopeWrapper};
/// use nalgebra::{Point3, Vector3};
///
/// let cube = ParallelotopeWrapper::new(
///     ParallelotopeOrtho::new(Point3::new(-0.5, -0.5, -0.5), Vector3::repeat(1.0)).unwrap(),
/// );
/// let objects = [cube];
///
/// let mut tree = SpatialSubdivisionTree::<f64, 3>::new(2, 1);
/// tree.decompose_objects(&objects, 1, &()).unwrap();
///
/// let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::x());
/// let root_t = tree.intersect_root(&ray).unwrap();
///
/// let mut hit = None;
/// let found = tree.trace_ray(&ray, root_t, |indices| {
///     let t = indices
///         .iter()
///         .filter_map(|i| objects[*i as usize].intersect(&ray))
///         .min_by(|a, b| a.total_cmp(b))?;
///     hit = Some(t);
///     Some(ray.point_at(t))
/// });
///
/// assert!(found);
/// assert!((hit.unwrap() - 4.5).abs() < 1.0e-9);
/// ```
#[derive(Clone, Debug)]
pub struct SpatialSubdivisionTree<T: Real, const N: usize, P = ParallelotopeOrtho<T, N>> {
    pub(super) max_depth: usize,
    pub(super) min_objects_per_box: usize,
    pub(super) tolerances: Tolerances<T>,
    pub(super) distance_from_facet: T,
    pub(super) boxes: Vec<TreeBox<P>>,
}

impl<T: Real, const N: usize, P: ParallelotopeShape<T, N>> SpatialSubdivisionTree<T, N, P> {
    /// Creates an empty tree.
    ///
    /// Boxes deeper than `max_depth`, counting the root as depth 1, are never created, and
    /// boxes intersecting at most `min_objects_per_box` objects are never subdivided. Both
    /// values are checked by [`Self::decompose`] against [`MAX_DEPTH_BOUNDS`] and
    /// [`MIN_OBJECTS_PER_BOX_BOUNDS`].
    pub fn new(max_depth: usize, min_objects_per_box: usize) -> Self {
        Self {
            max_depth,
            min_objects_per_box,
            tolerances: Tolerances::default(),
            distance_from_facet: T::zero(),
            boxes: Vec::new(),
        }
    }

    /// Replaces the numerical tolerances used to build and to query this tree.
    pub fn with_tolerances(mut self, tolerances: Tolerances<T>) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// The maximum depth of this tree.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The object count at or below which a box is not subdivided.
    #[inline]
    pub fn min_objects_per_box(&self) -> usize {
        self.min_objects_per_box
    }

    /// The numerical tolerances used by this tree.
    #[inline]
    pub fn tolerances(&self) -> &Tolerances<T> {
        &self.tolerances
    }

    /// The distance past a box facet at which the next box is looked up when tracing a ray.
    ///
    /// This is also the margin added around the objects to compute the root box. It is zero
    /// until the tree is built.
    #[inline]
    pub fn distance_from_facet(&self) -> T {
        self.distance_from_facet
    }

    /// Does this tree have no box?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// All the boxes of the tree. The root is the first one.
    #[inline]
    pub fn boxes(&self) -> &[TreeBox<P>] {
        &self.boxes
    }

    /// The root box, if the tree was built.
    #[inline]
    pub fn root(&self) -> Option<&TreeBox<P>> {
        self.boxes.first()
    }

    /// The number of boxes, leaves and inner boxes.
    #[inline]
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// The number of leaf boxes.
    pub fn leaf_count(&self) -> usize {
        self.boxes.iter().filter(|b| b.is_leaf()).count()
    }

    /// The number of levels of the tree: 1 for a tree reduced to its root, 0 for an empty tree.
    pub fn depth(&self) -> usize {
        if self.boxes.is_empty() {
            return 0;
        }

        let mut max_depth = 0;
        let mut stack = vec![(0u32, 1usize)];

        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(
                self.boxes[id as usize]
                    .children
                    .iter()
                    .map(|child| (*child, depth + 1)),
            );
        }

        max_depth
    }

    /// The leaf containing `point`, if `point` is inside the root box.
    ///
    /// Points on the boundary between boxes are inside all of them: the leaf returned is the
    /// first one found while descending from the root through the first child containing
    /// the point.
    pub fn find_leaf(&self, point: &Point<T, N>) -> Option<&TreeBox<P>> {
        let mut current = self.root()?;
        if !current.parallelotope.inside(point) {
            return None;
        }

        while !current.is_leaf() {
            current = current
                .children
                .iter()
                .map(|child| &self.boxes[*child as usize])
                .find(|child| child.parallelotope.inside(point))?;
        }

        Some(current)
    }
}
