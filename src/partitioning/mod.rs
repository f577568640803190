//! Spatial partitioning tools.
//!
//! The [`SpatialSubdivisionTree`] recursively splits a parallelotope enclosing a set of
//! convex objects into its `2^N` halves, and finds the objects a ray may hit by walking
//! through the leaves the ray crosses.

pub use self::subdivision::{
    BuildProgress, ChildIndices, ProgressCounter, SpatialSubdivisionTree, TreeBox, TreeError,
    MAX_DEPTH_BOUNDS, MIN_OBJECTS_PER_BOX_BOUNDS,
};

mod subdivision;
