//! Non-persistent geometric queries.
//!
//! # General cases
//! The most general methods provided by this module are:
//!
//! * [`shape_intersection()`] to determine if two convex shapes intersect.
//! * [`line_segment_intersects_shape()`] to determine if a bounded segment crosses a shape.
//!
//! The shapes involved are seen through the [`ShapeView`] trait. Shapes that span the
//! whole space additionally provide a [`SolidShape`] view used for point containment.

pub use self::ray::Ray;
pub use self::shape_intersection::{
    line_segment_intersects_shape, shape_intersection, ShapeView, SolidShape, VertexRidge,
};
pub use self::tolerances::Tolerances;

pub mod ray;
mod shape_intersection;
mod tolerances;
