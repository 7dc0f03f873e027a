//! Minimum spanning trees of dense graphs via Prim's algorithm.

use crate::{
    errors::{ChristofidesError, Result},
    graph::*,
};
use log::debug;

/// # Prim's algorithm on a dense graph
///
/// Grows the tree from node 0. Each node outside the tree keeps the cheapest edge connecting
/// it to the tree (its key); in every round the node with the smallest key joins. A scan over
/// the key array is asymptotically optimal for complete graphs and takes `O(n^2)` time.
///
/// Ties are resolved deterministically: among nodes with equal keys the smallest index joins
/// first, and a key is only replaced by a strictly cheaper edge.
///
/// Fails with [`ChristofidesError::GraphDisconnected`] if some node cannot be reached via
/// finite weights.
pub fn prim<G: WeightLookup>(graph: &G) -> Result<SpanningTree> {
    let n = graph.number_of_nodes();
    if n <= 1 {
        return Ok(SpanningTree::new(n, Vec::new()));
    }

    let mut in_tree = vec![false; graph.len()];
    let mut key = vec![Weight::INFINITY; graph.len()];
    let mut connector: Vec<Node> = vec![0; graph.len()];
    let mut edges = Vec::with_capacity(graph.len() - 1);

    let mut joined: Node = 0;
    in_tree[0] = true;

    for _ in 1..n {
        for v in graph.vertices() {
            if in_tree[v as usize] {
                continue;
            }

            let w = graph.weight(joined, v);
            if w < key[v as usize] {
                key[v as usize] = w;
                connector[v as usize] = joined;
            }
        }

        let next = graph
            .vertices()
            .filter(|&v| !in_tree[v as usize])
            .min_by(|&a, &b| key[a as usize].total_cmp(&key[b as usize]))
            .expect("at least one node is outside the tree");

        if key[next as usize].is_infinite() {
            return Err(ChristofidesError::GraphDisconnected { vertex: next });
        }

        in_tree[next as usize] = true;
        edges.push(WeightedEdge(
            connector[next as usize],
            next,
            key[next as usize],
        ));
        joined = next;
    }

    let tree = SpanningTree::new(n, edges);
    debug!(
        "Prim: spanning tree with {} edges and weight {}",
        tree.number_of_edges(),
        tree.weight()
    );

    Ok(tree)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{errors::InvariantCheck, testing::*};
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    #[test]
    fn trivial_graphs() {
        for n in 0..2 {
            let tree = prim(&WeightMatrix::from_fn(n, |_, _| 1.0)).unwrap();
            assert_eq!(tree.number_of_edges(), 0);
            assert_eq!(tree.weight(), 0.0);
        }
    }

    #[test]
    fn four_node_instance() {
        let matrix = WeightMatrix::try_from_rows(&[
            [0.0, 10.0, 15.0, 20.0],
            [10.0, 0.0, 35.0, 25.0],
            [15.0, 35.0, 0.0, 30.0],
            [20.0, 25.0, 30.0, 0.0],
        ])
        .unwrap();

        let tree = prim(&matrix).unwrap();
        assert_eq!(tree.weight(), 45.0);
        assert_eq!(
            tree.unweighted_edges().collect_vec(),
            vec![Edge(0, 1), Edge(0, 2), Edge(0, 3)]
        );
    }

    #[test]
    fn ties_are_deterministic() {
        let matrix = WeightMatrix::from_fn(6, |_, _| 1.0);
        let first = prim(&matrix).unwrap();
        let second = prim(&matrix).unwrap();

        assert_eq!(first, second);
        // all keys equal: node 0 connects everybody, lowest index first
        assert_eq!(
            first.unweighted_edges().collect_vec(),
            (1..6).map(|v| Edge(0, v)).collect_vec()
        );
    }

    #[test]
    fn disconnected_graph() {
        let inf = Weight::INFINITY;
        let matrix = WeightMatrix::try_from_rows(&[
            [0.0, 1.0, inf, 2.0],
            [1.0, 0.0, inf, 1.0],
            [inf, inf, 0.0, inf],
            [2.0, 1.0, inf, 0.0],
        ])
        .unwrap();

        assert_eq!(
            prim(&matrix),
            Err(ChristofidesError::GraphDisconnected { vertex: 2 })
        );
    }

    #[test]
    fn matches_brute_force() {
        let mut rng = Pcg64::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let n = rng.gen_range(2..=7);
            let matrix = random_symmetric_matrix(&mut rng, n, 0.0..10.0);

            let tree = prim(&matrix).unwrap();
            assert!(tree.is_correct().is_ok());
            assert_eq!(tree.number_of_edges() as NumNodes, n - 1);

            let best = brute_force_mst_weight(&matrix);
            assert!(
                (tree.weight() - best).abs() < EPSILON,
                "prim: {} brute force: {best}",
                tree.weight()
            );
        }
    }
}
