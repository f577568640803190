//! Combinatorial queries shared by all the parallelotopes.

use crate::math::{Point, Real, Vector};
use crate::query::VertexRidge;
use crate::shape::ParallelotopeShape;

fn edges<T: Real, const N: usize, P: ParallelotopeShape<T, N>>(p: &P) -> [Vector<T, N>; N] {
    core::array::from_fn(|i| p.e(i))
}

/// The `2^N` vertices of the parallelotope.
///
/// Vertex `k` is `org + Σ e(i)` over the bits `i` set in `k`.
pub fn vertices<T, const N: usize, P>(p: &P) -> Vec<Point<T, N>>
where
    T: Real,
    P: ParallelotopeShape<T, N>,
{
    let edges = edges(p);
    let org = p.org();

    (0..1usize << N)
        .map(|k| {
            let mut vertex = org;
            for (i, e) in edges.iter().enumerate() {
                if k & (1 << i) != 0 {
                    vertex += e;
                }
            }
            vertex
        })
        .collect()
}

/// The `N · 2^(N-1)` edges of the parallelotope, each one starting at the vertex where its
/// coordinate bit is not set.
pub fn vertex_ridges<T, const N: usize, P>(p: &P) -> Vec<VertexRidge<T, N>>
where
    T: Real,
    P: ParallelotopeShape<T, N>,
{
    let edges = edges(p);
    let mut ridges = Vec::with_capacity(N << N.saturating_sub(1));

    for (k, vertex) in vertices(p).into_iter().enumerate() {
        for (i, e) in edges.iter().enumerate() {
            if k & (1 << i) == 0 {
                ridges.push(VertexRidge::new(vertex, *e));
            }
        }
    }

    ridges
}

/// The `2^(N-1)` main diagonals `e(0) ± e(1) ± … ± e(N-1)`.
pub fn diagonals<T, const N: usize, P>(p: &P) -> Vec<Vector<T, N>>
where
    T: Real,
    P: ParallelotopeShape<T, N>,
{
    let edges = edges(p);
    let Some((first, others)) = edges.split_first() else {
        return Vec::new();
    };

    (0..1usize << others.len())
        .map(|k| {
            let mut diagonal = *first;
            for (i, e) in others.iter().enumerate() {
                if k & (1 << i) != 0 {
                    diagonal -= e;
                } else {
                    diagonal += e;
                }
            }
            diagonal
        })
        .collect()
}

/// The length of the longest main diagonal.
pub fn max_diagonal<T, const N: usize, P>(p: &P) -> T
where
    T: Real,
    P: ParallelotopeShape<T, N>,
{
    diagonals(p)
        .iter()
        .map(|d| d.norm())
        .fold(T::zero(), |a, b| a.max(b))
}
