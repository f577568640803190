use super::SpatialSubdivisionTree;
use crate::math::{real, Real};
use crate::shape::ParallelotopeShape;

impl<T: Real, const N: usize, P: ParallelotopeShape<T, N>> SpatialSubdivisionTree<T, N, P> {
    /// Panics if the tree isn’t well-formed.
    ///
    /// The tree is well-formed if it is topologically correct (every box is reached exactly
    /// once from the root, children have consecutive valid indices, inner boxes have
    /// exactly `2^N` children and no objects) and geometrically correct (the center of each
    /// box is inside its parent, and leaves are not deeper than the maximum depth).
    ///
    /// This is mostly a utility for debugging.
    pub fn assert_well_formed(&self) {
        if self.is_empty() {
            return;
        }

        let mut visited = vec![false; self.boxes.len()];
        let mut stack = vec![(0u32, 1usize)];

        while let Some((id, depth)) = stack.pop() {
            assert!(!visited[id as usize], "box {} is reached twice", id);
            visited[id as usize] = true;
            assert!(depth <= self.max_depth, "box {} is too deep", id);

            let tree_box = &self.boxes[id as usize];

            if tree_box.is_leaf() {
                assert!(
                    tree_box
                        .object_indices
                        .windows(2)
                        .all(|pair| pair[0] < pair[1]),
                    "the objects of box {} are not sorted",
                    id
                );
                continue;
            }

            assert!(tree_box.object_indices.is_empty());
            assert_eq!(tree_box.children.len(), 1 << N);

            for (k, child) in tree_box.children.iter().enumerate() {
                assert_eq!(*child, tree_box.children[0] + k as u32);
                assert!(*child > id);
                assert!((*child as usize) < self.boxes.len());

                let parallelotope = &self.boxes[*child as usize].parallelotope;
                let mut center = parallelotope.org();
                for i in 0..N {
                    center += parallelotope.e(i) * real::<T>(0.5);
                }
                assert!(tree_box.parallelotope.inside(&center));

                stack.push((*child, depth + 1));
            }
        }

        assert!(visited.iter().all(|v| *v), "some boxes are unreachable");
    }
}
