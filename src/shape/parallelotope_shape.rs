use crate::math::{Point, Real, Vector};
use crate::query::Ray;
use crate::shape::ParallelotopeError;
use core::fmt;
use num::Bounded;

/// Operations shared by the general and the axis-aligned parallelotopes.
///
/// A parallelotope is the N-dimensional generalization of a parallelogram: the set of points
/// `org + Σ t_i e_i` with every `t_i` in `[0, 1]`. It is also the intersection of `N` slabs,
/// each one bounded by two parallel hyperplanes, which is how it is queried.
pub trait ParallelotopeShape<T: Real, const N: usize>:
    Clone + fmt::Debug + fmt::Display + Send + Sync + Sized
{
    /// The axis-aligned parallelotope with the corners `min` and `max`.
    fn from_corners(min: &Point<T, N>, max: &Point<T, N>) -> Result<Self, ParallelotopeError>;

    /// The origin vertex.
    fn org(&self) -> Point<T, N>;

    /// The `i`-th edge vector.
    fn e(&self, i: usize) -> Vector<T, N>;

    /// Is `point` inside this parallelotope?
    ///
    /// Points on the boundary are inside.
    fn inside(&self, point: &Point<T, N>) -> bool;

    /// Computes the ray parameter of the first intersection of `ray` with this parallelotope.
    ///
    /// If the ray starts inside the parallelotope, this is the parameter where the ray leaves
    /// it. Parameters smaller than or equal to `intersection_threshold` are never returned.
    /// Facets whose normal is almost orthogonal to the ray direction, with a tolerance of
    /// `epsilon`, are considered parallel to the ray.
    fn intersect(&self, ray: &Ray<T, N>, epsilon: T, intersection_threshold: T) -> Option<T>;

    /// Computes the ray parameter where `ray` leaves this parallelotope, and the outward unit
    /// normal of the facet it leaves through.
    ///
    /// No threshold applies: a ray starting on the facet it leaves through gives a zero
    /// parameter, and a ray starting past it gives a negative one. Returns `None` if the line of
    /// the ray misses this parallelotope, or if it is parallel to every facet.
    fn intersect_farthest(&self, ray: &Ray<T, N>, epsilon: T) -> Option<(T, Vector<T, N>)>;

    /// The outward unit normal of the facet closest to `point`.
    fn normal(&self, point: &Point<T, N>) -> Vector<T, N>;

    /// Splits this parallelotope into its `2^N` halves.
    ///
    /// The `k`-th child is shifted by half of the edge `e(i)` for every bit `i` set in `k`.
    fn binary_division(&self) -> Vec<Self>;
}

/// One slab of a parallelotope as seen from a ray.
///
/// `s` is the projection of the ray direction on the slab normal, `d` the projection of the ray
/// origin. The slab is `d ≤ d1` and `-d ≤ d2`.
#[derive(Copy, Clone, Debug)]
pub(crate) struct RaySlab<T> {
    pub s: T,
    pub d: T,
    pub d1: T,
    pub d2: T,
}

/// The range of ray parameters inside the intersection of a set of slabs.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SlabInterval<T> {
    /// Where the ray enters the last slab it enters.
    pub near: T,
    /// Where the ray leaves the first slab it leaves.
    pub far: T,
    /// The slab the ray leaves through, and whether it leaves through its `d1` side.
    pub exit: Option<(usize, bool)>,
}

/// Slab-method intersection of a ray with the intersection of the given slabs.
///
/// Returns `None` if the line of the ray misses it.
pub(crate) fn slab_interval<T: Real>(
    slabs: impl IntoIterator<Item = RaySlab<T>>,
    epsilon: T,
) -> Option<SlabInterval<T>> {
    let mut near = <T as Bounded>::min_value();
    let mut far = <T as Bounded>::max_value();
    let mut exit = None;

    for (i, RaySlab { s, d, d1, d2 }) in slabs.into_iter().enumerate() {
        if s.abs() < epsilon {
            // Parallel to the slab: the origin decides.
            if d - d1 > T::zero() || -d - d2 > T::zero() {
                return None;
            }
            continue;
        }

        let alpha1 = (d1 - d) / s;
        let alpha2 = (d2 + d) / -s;
        let (enter, leave) = if s < T::zero() {
            (alpha1, alpha2)
        } else {
            (alpha2, alpha1)
        };

        near = near.max(enter);
        if leave < far {
            far = leave;
            exit = Some((i, s > T::zero()));
        }

        if far < near {
            return None;
        }
    }

    Some(SlabInterval { near, far, exit })
}

/// The first intersection of a ray with the intersection of the given slabs, past
/// `intersection_threshold`.
pub(crate) fn intersect_slabs<T: Real>(
    slabs: impl IntoIterator<Item = RaySlab<T>>,
    epsilon: T,
    intersection_threshold: T,
) -> Option<T> {
    let SlabInterval { near, far, .. } = slab_interval(slabs, epsilon)?;
    if far < T::zero() {
        return None;
    }

    let t = if near > intersection_threshold {
        near
    } else {
        far
    };

    (t > intersection_threshold).then_some(t)
}

/// The vector whose `i`-th component is `value`, all the others being zero.
pub(crate) fn axis<T: Real, const N: usize>(i: usize, value: T) -> Vector<T, N> {
    let mut v = Vector::zeros();
    v[i] = value;
    v
}

pub(crate) fn fmt_coords<T: fmt::Display>(
    f: &mut fmt::Formatter,
    coords: impl IntoIterator<Item = T>,
) -> fmt::Result {
    write!(f, "(")?;
    for (i, c) in coords.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, ")")
}
