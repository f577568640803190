use super::{MAX_DEPTH_BOUNDS, MIN_OBJECTS_PER_BOX_BOUNDS};
use crate::shape::ParallelotopeError;

/// Errors that can occur when building a [`SpatialSubdivisionTree`](super::SpatialSubdivisionTree).
#[derive(thiserror::Error, Debug)]
pub enum TreeError {
    /// The maximum depth is outside of [`MAX_DEPTH_BOUNDS`].
    #[error("the maximum tree depth {0} is out of the bounds {bounds:?}.", bounds = MAX_DEPTH_BOUNDS)]
    MaxDepthOutOfBounds(usize),

    /// The minimum object count per box is outside of [`MIN_OBJECTS_PER_BOX_BOUNDS`].
    #[error("the minimum object count per box {0} is out of the bounds {bounds:?}.", bounds = MIN_OBJECTS_PER_BOX_BOUNDS)]
    MinObjectsOutOfBounds(usize),

    /// The build was requested with zero threads.
    #[error("at least one thread is needed to build the tree.")]
    NoThreads,

    /// There are more objects than `u32` indices.
    #[error("{0} objects exceed the maximum supported object count.")]
    TooManyObjects(usize),

    /// The objects do not span all the dimensions, or have non-finite coordinates.
    #[error("the objects have no extent along dimension {dimension}.")]
    DegenerateObjects {
        /// The first dimension along which the bounds of the objects are empty or invalid.
        dimension: usize,
    },

    /// The distance a ray is moved past a box boundary is too large for the smallest boxes.
    #[error("the distance from facets {distance} is not less than half of the smallest box size {half_box_size} along dimension {dimension}.")]
    FacetDistanceTooLarge {
        /// The distance a traced ray is moved past the box boundaries.
        distance: f64,
        /// Half of the size of the smallest boxes.
        half_box_size: f64,
        /// The dimension along which the smallest boxes are too small.
        dimension: usize,
    },

    /// The tree needs more boxes than `u32` indices.
    #[error("the tree exceeds the maximum supported box count.")]
    TooManyBoxes,

    /// The progress sink cancelled the build.
    #[error("the tree build was cancelled.")]
    Cancelled,

    /// The build stopped before every box was created.
    #[error("the tree build ended with {missing} boxes never created.")]
    Incomplete {
        /// The number of reserved boxes that were never written.
        missing: usize,
    },

    /// The thread pool could not be created.
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A box parallelotope could not be created.
    #[error(transparent)]
    Parallelotope(#[from] ParallelotopeError),
}
