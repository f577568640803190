pub use self::error::TreeError;
pub use self::progress::{BuildProgress, ProgressCounter};
pub use self::tree::{SpatialSubdivisionTree, MAX_DEPTH_BOUNDS, MIN_OBJECTS_PER_BOX_BOUNDS};
pub use self::tree_box::{ChildIndices, TreeBox};

mod box_jobs;
mod build;
mod error;
mod progress;
mod traversal;
mod tree;
mod tree_box;
mod validation;
