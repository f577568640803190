/*!
hypertree
========

**hypertree** is an N-dimensional spatial subdivision library written with
the rust programming language.

It builds 2^N-trees (binary trees in 1D, quadtrees in 2D, octrees in 3D, and so on)
over a static set of convex cells, and uses them to accelerate ray casting. The
boxes of the tree are parallelotopes, either axis-aligned
([`ParallelotopeOrtho`](shape::ParallelotopeOrtho)) or general
([`Parallelotope`](shape::Parallelotope)).

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![allow(clippy::type_complexity)] // Complains about closures that are fairly simple.

extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod partitioning;
pub mod query;
pub mod shape;

/// Aliases for mathematical types, generic over the scalar type and the dimension.
pub mod math {
    use num::Bounded;

    /// The point type.
    pub use na::Point;

    /// The vector type.
    pub use na::SVector as Vector;

    /// The square matrix type.
    pub type Matrix<T, const N: usize> = na::SMatrix<T, N, N>;

    /// The scalar types this crate works with.
    ///
    /// This is implemented for every floating-point type satisfying the bounds, in practice
    /// `f32` and `f64`.
    pub trait Real: na::RealField + Copy + Bounded {}

    impl<T: na::RealField + Copy + Bounded> Real for T {}

    /// Converts an `f64` constant to the scalar type `T`.
    #[inline]
    pub fn real<T: Real>(value: f64) -> T {
        na::convert(value)
    }
}
