use super::SpatialSubdivisionTree;
use crate::math::{Point, Real, Vector};
use crate::query::Ray;
use crate::shape::ParallelotopeShape;

impl<T: Real, const N: usize, P: ParallelotopeShape<T, N>> SpatialSubdivisionTree<T, N, P> {
    /// The ray parameter where `ray` enters the root box, or leaves it if it starts inside.
    ///
    /// Returns `None` if the ray misses the root box or if the tree is empty.
    pub fn intersect_root(&self, ray: &Ray<T, N>) -> Option<T> {
        self.root()?.parallelotope.intersect(
            ray,
            self.tolerances.epsilon,
            self.tolerances.intersection_threshold,
        )
    }

    /// Walks `ray` through the leaves it crosses, in order, until `try_intersect` finds a hit.
    ///
    /// `root_t` is the parameter where the ray enters the root box, as computed by
    /// [`Self::intersect_root`]; it is used if the ray starts outside of the tree.
    ///
    /// `try_intersect` is called with the indices of the objects of each non-empty leaf, and
    /// returns the point where the ray hits the closest of them, if any. A hit is only
    /// accepted if it is inside the leaf being visited: otherwise, a closer hit may still
    /// exist among the objects of the next leaves.
    ///
    /// The ray origin is moved to the point where the ray leaves each leaf, and the next leaf
    /// is looked up [`Self::distance_from_facet`] past that point along the normal of the
    /// facet it crosses. When the ray leaves the next leaf at the same point, through a corner
    /// or an edge, the normals of the crossed facets add up.
    ///
    /// Returns `true` as soon as a hit is accepted, and `false` once the ray leaves the tree.
    pub fn trace_ray(
        &self,
        ray: &Ray<T, N>,
        root_t: T,
        mut try_intersect: impl FnMut(&[u32]) -> Option<Point<T, N>>,
    ) -> bool {
        let Some(root) = self.root() else {
            return false;
        };
        if !(ray.dir.norm_squared() > T::zero()) {
            return false;
        }

        let distance = self.distance_from_facet;
        let mut ray = *ray;
        let mut lookup = ray.origin;
        let mut offset = Vector::<T, N>::zeros();
        let mut stalls = 0;
        let mut first = true;

        loop {
            match self.find_leaf(&lookup) {
                Some(leaf) => {
                    if !leaf.object_indices.is_empty() {
                        if let Some(hit) = try_intersect(leaf.object_indices()) {
                            if leaf.parallelotope.inside(&hit) {
                                return true;
                            }
                        }
                    }

                    let Some((t, normal)) =
                        leaf.parallelotope.intersect_farthest(&ray, self.tolerances.epsilon)
                    else {
                        return false;
                    };

                    let exit = ray.point_at(t.max(T::zero()));
                    if exit == ray.origin {
                        // At most one facet per dimension can be crossed at a single point.
                        stalls += 1;
                        if stalls > N {
                            return false;
                        }
                        offset += normal;
                    } else {
                        stalls = 0;
                        offset = normal;
                        ray = ray.with_origin(exit);
                    }
                }
                None if first => {
                    let entry = ray.point_at(root_t);
                    ray = ray.with_origin(entry);
                    offset = -root.parallelotope.normal(&entry);
                }
                None => return false,
            }

            first = false;
            lookup = ray.origin + offset * distance;
        }
    }
}
