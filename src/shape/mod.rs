//! Parallelotopes: the boxes of the spatial subdivision trees.
//!
//! Two variants implement the [`ParallelotopeShape`] trait: the general [`Parallelotope`]
//! with arbitrary edges, and the axis-aligned [`ParallelotopeOrtho`]. Any of them can be
//! tested for intersection with other convex shapes once wrapped in a
//! [`ParallelotopeWrapper`].

pub use self::error::ParallelotopeError;
pub use self::parallelotope::Parallelotope;
pub use self::parallelotope_ortho::ParallelotopeOrtho;
pub use self::parallelotope_shape::ParallelotopeShape;
pub use self::parallelotope_wrapper::ParallelotopeWrapper;

mod error;
mod parallelotope;
pub mod parallelotope_algorithm;
mod parallelotope_ortho;
mod parallelotope_shape;
mod parallelotope_wrapper;
