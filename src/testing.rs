use std::ops::Range;

use super::graph::*;
use itertools::Itertools as _;
use rand::Rng;

pub fn random_symmetric_matrix(
    rng: &mut impl Rng,
    n: NumNodes,
    weights: Range<Weight>,
) -> WeightMatrix {
    WeightMatrix::from_fn(n, |_, _| rng.gen_range(weights.clone()))
}

/// Weight of a minimum spanning tree obtained by trying every subset of `n - 1` edges
pub fn brute_force_mst_weight(matrix: &WeightMatrix) -> Weight {
    let n = matrix.number_of_nodes();
    let edges = matrix.vertices().tuple_combinations::<(_, _)>().collect_vec();

    edges
        .into_iter()
        .combinations(n.saturating_sub(1) as usize)
        .filter(|subset| {
            let mut component: Vec<Node> = matrix.vertices().collect();
            subset.iter().all(|&(u, v)| {
                let (cu, cv) = (component[u as usize], component[v as usize]);
                if cu == cv {
                    return false;
                }
                component.iter_mut().filter(|c| **c == cv).for_each(|c| *c = cu);
                true
            })
        })
        .map(|subset| subset.iter().map(|&(u, v)| matrix.weight(u, v)).sum::<Weight>())
        .fold(Weight::INFINITY, Weight::min)
}

/// Weight of a minimum perfect matching of `nodes` by exhaustive recursion
pub fn brute_force_matching_weight(matrix: &WeightMatrix, nodes: &[Node]) -> Weight {
    let Some((&first, rest)) = nodes.split_first() else {
        return 0.0;
    };

    (0..rest.len())
        .map(|i| {
            let remaining = rest
                .iter()
                .enumerate()
                .filter_map(|(j, &v)| (j != i).then_some(v))
                .collect_vec();
            matrix.weight(first, rest[i]) + brute_force_matching_weight(matrix, &remaining)
        })
        .fold(Weight::INFINITY, Weight::min)
}

/// Weight of an optimal tour, found by enumerating all tours starting at node 0
pub fn brute_force_tour_weight(matrix: &WeightMatrix) -> Weight {
    let n = matrix.number_of_nodes();
    if n <= 1 {
        return 0.0;
    }

    (1..n)
        .permutations(n as usize - 1)
        .map(|perm| {
            std::iter::once(0)
                .chain(perm)
                .chain(std::iter::once(0))
                .tuple_windows()
                .map(|(u, v)| matrix.weight(u, v))
                .sum::<Weight>()
        })
        .fold(Weight::INFINITY, Weight::min)
}
