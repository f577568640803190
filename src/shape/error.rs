/// Errors that can occur when constructing a parallelotope.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParallelotopeError {
    /// The size of an orthogonal parallelotope along one dimension is zero, negative or NaN.
    #[error("the size of the orthogonal parallelotope along dimension {dimension} is not positive.")]
    NonPositiveSize {
        /// The dimension with the invalid size.
        dimension: usize,
    },

    /// An edge of an orthogonal parallelotope is not parallel to its coordinate axis.
    #[error("the edge {edge} of the orthogonal parallelotope has a non-zero component outside of axis {edge}.")]
    NonOrthogonalEdge {
        /// The index of the invalid edge.
        edge: usize,
    },

    /// The edges of the parallelotope are linearly dependent.
    #[error("the parallelotope edges are linearly dependent.")]
    DegenerateEdges,
}
