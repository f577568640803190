use crate::math::{real, Real};

/// Numerical tolerances used by parallelotope ray casts and by the spatial subdivision tree.
///
/// All the values are expressed in the scalar type of the geometry. The defaults are derived
/// from the machine epsilon `ε` of that type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tolerances<T> {
    /// A ray whose direction has a projection on a facet normal smaller than this (in absolute
    /// value) is considered parallel to that facet.
    ///
    /// Defaults to `100 ε`.
    pub epsilon: T,

    /// Ray parameters smaller than or equal to this are not reported as intersections.
    ///
    /// This prevents reporting the origin of a ray lying on a boundary as an intersection.
    /// Defaults to `1000 ε`.
    pub intersection_threshold: T,

    /// The size of the guard region around the tree, and the distance past a box facet at which
    /// a traced ray looks up the next box, in units of `ε` times the largest absolute coordinate
    /// of the objects.
    ///
    /// Defaults to `10`.
    pub distance_from_facet_in_epsilons: T,
}

impl<T: Real> Default for Tolerances<T> {
    fn default() -> Self {
        let eps = T::default_epsilon();
        Self {
            epsilon: eps * real::<T>(100.0),
            intersection_threshold: eps * real::<T>(1000.0),
            distance_from_facet_in_epsilons: real(10.0),
        }
    }
}
