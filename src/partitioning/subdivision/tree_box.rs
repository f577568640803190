use smallvec::SmallVec;

/// The indices of the children of a box.
///
/// Inline storage covers the `2^N` children up to three dimensions.
pub type ChildIndices = SmallVec<[u32; 8]>;

/// A box of a [`SpatialSubdivisionTree`](super::SpatialSubdivisionTree).
///
/// A box is either a leaf, listing the objects intersecting its parallelotope, or an inner box
/// with exactly `2^N` children and no objects.
#[derive(Clone, Debug)]
pub struct TreeBox<P> {
    pub(super) parallelotope: P,
    pub(super) object_indices: Vec<u32>,
    pub(super) children: ChildIndices,
}

impl<P> TreeBox<P> {
    pub(super) fn leaf(parallelotope: P, object_indices: Vec<u32>) -> Self {
        Self {
            parallelotope,
            object_indices,
            children: ChildIndices::new(),
        }
    }

    pub(super) fn subdivided(parallelotope: P, first_child: u32, child_count: u32) -> Self {
        Self {
            parallelotope,
            object_indices: Vec::new(),
            children: (first_child..first_child + child_count).collect(),
        }
    }

    /// The region of space covered by this box.
    #[inline]
    pub fn parallelotope(&self) -> &P {
        &self.parallelotope
    }

    /// The indices of the objects intersecting this box.
    ///
    /// This is empty for any box that is not a leaf.
    #[inline]
    pub fn object_indices(&self) -> &[u32] {
        &self.object_indices
    }

    /// The indices, in the tree, of the children of this box.
    ///
    /// This is empty for leaves.
    #[inline]
    pub fn children(&self) -> &[u32] {
        &self.children
    }

    /// Is this box a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
