//! Ray-casting related definitions.

#[doc(inline)]
pub use self::ray::Ray;

#[doc(hidden)]
pub mod ray;
