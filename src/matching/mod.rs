//! Minimum-weight perfect matchings on the complete graph induced by a node subset.

pub mod blossom;

pub use blossom::BlossomSolver;

use itertools::Itertools;
use log::debug;

use crate::{
    errors::{InvariantCheck, InvariantViolation},
    graph::*,
};

/// A perfect matching of `nodes`; every node is incident to exactly one of `edges`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Matching {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    weight: Weight,
}

impl Matching {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the matched pairs; each is normalized and the list is sorted
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl InvariantCheck<InvariantViolation> for Matching {
    fn is_correct(&self) -> Result<(), InvariantViolation> {
        if 2 * self.edges.len() != self.nodes.len() {
            return Err(InvariantViolation::ImperfectMatching(format!(
                "{} edges for {} nodes",
                self.edges.len(),
                self.nodes.len()
            )));
        }

        if let Some(edge) = self.edges.iter().find(|e| !e.is_normalized()) {
            return Err(InvariantViolation::ImperfectMatching(format!(
                "edge {{{}, {}}} is not normalized",
                edge.0, edge.1
            )));
        }

        let covered = self
            .edges
            .iter()
            .flat_map(|&Edge(u, v)| [u, v])
            .sorted()
            .collect_vec();

        let expected = self.nodes.iter().copied().sorted().collect_vec();
        if covered != expected {
            return Err(InvariantViolation::ImperfectMatching(
                "matched nodes differ from the nodes to be matched".into(),
            ));
        }

        Ok(())
    }
}

/// Computes a perfect matching of minimum weight on the complete graph induced by `nodes`
/// using [`BlossomSolver`]. An empty node set yields an empty matching; an odd number of
/// nodes is reported as an [`InvariantViolation`].
///
/// # Example
/// ```
/// use christofides::{graph::*, matching::min_weight_perfect_matching};
/// let matrix = WeightMatrix::from_fn(4, |u, v| if u + 1 == v { 1.0 } else { 5.0 });
/// let matching = min_weight_perfect_matching(&matrix, &[0, 1, 2, 3]).unwrap();
/// assert_eq!(matching.edges(), &[Edge(0, 1), Edge(2, 3)]);
/// assert_eq!(matching.weight(), 2.0);
/// ```
pub fn min_weight_perfect_matching(
    matrix: &WeightMatrix,
    nodes: &[Node],
) -> Result<Matching, InvariantViolation> {
    if nodes.len() % 2 == 1 {
        return Err(InvariantViolation::OddSizedOddSet { count: nodes.len() });
    }

    if nodes.is_empty() {
        return Ok(Matching::default());
    }

    let mut solver = BlossomSolver::new(&matrix.induced(nodes));
    solver.run()?;
    debug_assert!(solver.is_correct().is_ok());

    let edges = solver
        .matched_pairs()
        .map(|(a, b)| Edge(nodes[a], nodes[b]).normalized())
        .sorted()
        .collect_vec();
    let weight = matrix.total_weight(edges.iter().copied());

    debug!(
        "Matching: {} pairs on {} nodes with weight {weight}",
        edges.len(),
        nodes.len()
    );

    Ok(Matching {
        nodes: nodes.to_vec(),
        edges,
        weight,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    #[test]
    fn empty_and_odd() {
        let matrix = WeightMatrix::from_fn(3, |_, _| 1.0);

        let matching = min_weight_perfect_matching(&matrix, &[]).unwrap();
        assert!(matching.is_empty());
        assert!(matching.is_correct().is_ok());

        assert_eq!(
            min_weight_perfect_matching(&matrix, &[0, 1, 2]),
            Err(InvariantViolation::OddSizedOddSet { count: 3 })
        );
    }

    #[test]
    fn single_pair() {
        let matrix = WeightMatrix::from_fn(5, |u, v| (u + v) as Weight);
        let matching = min_weight_perfect_matching(&matrix, &[4, 1]).unwrap();
        assert_eq!(matching.edges(), &[Edge(1, 4)]);
        assert_eq!(matching.weight(), 5.0);
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

        let matching = min_weight_perfect_matching(&matrix, &[0, 1, 2, 3]).unwrap();
        assert!(matching.is_correct().is_ok());
        assert_eq!(matching.len(), 2);
        assert_eq!(matching.weight(), 40.0);
    }

    #[test]
    fn cheapest_edge_is_not_always_matched() {
        // the cheapest edge {1, 2} must not be used: it forces {0, 3} of weight 100
        let matrix = WeightMatrix::try_from_rows(&[
            [0.0, 2.0, 50.0, 100.0],
            [2.0, 0.0, 1.0, 50.0],
            [50.0, 1.0, 0.0, 2.0],
            [100.0, 50.0, 2.0, 0.0],
        ])
        .unwrap();

        let matching = min_weight_perfect_matching(&matrix, &[0, 1, 2, 3]).unwrap();
        assert_eq!(matching.edges(), &[Edge(0, 1), Edge(2, 3)]);
        assert_eq!(matching.weight(), 4.0);
    }

    #[test]
    fn avoids_missing_edges() {
        let inf = Weight::INFINITY;
        let matrix = WeightMatrix::try_from_rows(&[
            [0.0, inf, 3.0, 9.0],
            [inf, 0.0, 9.0, 3.0],
            [3.0, 9.0, 0.0, 1.0],
            [9.0, 3.0, 1.0, 0.0],
        ])
        .unwrap();

        let matching = min_weight_perfect_matching(&matrix, &[0, 1, 2, 3]).unwrap();
        assert_eq!(matching.edges(), &[Edge(0, 2), Edge(1, 3)]);
        assert_eq!(matching.weight(), 6.0);
    }

    #[test]
    fn matches_brute_force() {
        let mut rng = Pcg64::seed_from_u64(0xb105);
        for _ in 0..500 {
            let k = 2 * rng.gen_range(1..=4);
            let matrix = random_symmetric_matrix(&mut rng, k, 0.0..20.0);
            let nodes: Vec<Node> = matrix.vertices().collect();

            let matching = min_weight_perfect_matching(&matrix, &nodes).unwrap();
            assert!(matching.is_correct().is_ok());
            assert_eq!(matching.len(), nodes.len() / 2);

            let best = brute_force_matching_weight(&matrix, &nodes);
            assert!(
                (matching.weight() - best).abs() < 1e-5,
                "blossom: {} brute force: {best} matrix: {matrix:?}",
                matching.weight()
            );
        }
    }

    #[test]
    fn integral_weights_with_many_ties() {
        let mut rng = Pcg64::seed_from_u64(7);
        for _ in 0..300 {
            let k = 2 * rng.gen_range(1..=4);
            let matrix = WeightMatrix::from_fn(k, |_, _| rng.gen_range(0..4) as Weight);
            let nodes: Vec<Node> = matrix.vertices().collect();

            let matching = min_weight_perfect_matching(&matrix, &nodes).unwrap();
            assert_eq!(matching.weight(), brute_force_matching_weight(&matrix, &nodes));
        }
    }

    #[test]
    fn subsets_of_euclidean_instances() {
        let mut rng = Pcg64::seed_from_u64(1234);
        for _ in 0..100 {
            let matrix = WeightMatrix::random_euclidean(&mut rng, 12, 100.0);
            let k = 2 * rng.gen_range(1..=4);
            let nodes: Vec<Node> = rand::seq::index::sample(&mut rng, 12, k)
                .into_iter()
                .map(|u| u as Node)
                .sorted()
                .collect();

            let matching = min_weight_perfect_matching(&matrix, &nodes).unwrap();
            assert!(matching.is_correct().is_ok());
            assert!(
                matching
                    .edges()
                    .iter()
                    .all(|e| nodes.contains(&e.0) && nodes.contains(&e.1))
            );

            let best = brute_force_matching_weight(&matrix, &nodes);
            assert!((matching.weight() - best).abs() < 1e-5);
        }
    }

    #[test]
    fn dual_certificate_on_larger_instances() {
        let mut rng = Pcg64::seed_from_u64(99);
        for k in [10, 16, 30, 50] {
            for _ in 0..5 {
                let matrix = random_symmetric_matrix(&mut rng, k, 1.0..100.0);
                let mut solver = BlossomSolver::new(&matrix);
                solver.run().unwrap();

                assert_eq!(solver.matched_pairs().count(), k as usize / 2);
                assert_eq!(solver.is_correct(), Ok(()));
            }
        }
    }

    #[test]
    fn certificate_detects_unfinished_solver() {
        let matrix = WeightMatrix::from_fn(4, |_, _| 1.0);
        let solver = BlossomSolver::new(&matrix);
        assert!(matches!(
            solver.is_correct(),
            Err(InvariantViolation::ImperfectMatching(_))
        ));
    }
}
