//! The Christofides pipeline: spanning tree, matching of odd nodes, Eulerian circuit,
//! shortcutting.

use std::time::Instant;

use log::info;

use crate::{
    errors::Result,
    euler::eulerian_circuit,
    graph::*,
    matching::{Matching, min_weight_perfect_matching},
    mst::prim,
    tour::HamiltonianTour,
};

/// All products of a pipeline run
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    tree: SpanningTree,
    odd_nodes: Vec<Node>,
    matching: Matching,
    tour: HamiltonianTour,
}

impl Solution {
    pub fn tree(&self) -> &SpanningTree {
        &self.tree
    }

    /// Nodes of odd degree in the spanning tree, ascending
    pub fn odd_nodes(&self) -> &[Node] {
        &self.odd_nodes
    }

    pub fn matching(&self) -> &Matching {
        &self.matching
    }

    pub fn tour(&self) -> &HamiltonianTour {
        &self.tour
    }

    pub fn cost(&self) -> Weight {
        self.tour.cost()
    }
}

/// Computes a tour with Christofides' algorithm. For symmetric weights obeying the triangle
/// inequality its cost is at most 3/2 times the optimum; other non-negative symmetric
/// weights still yield a valid tour, without guarantee.
///
/// The result is a deterministic function of `matrix`.
///
/// # Example
/// ```
/// use christofides::{christofides::christofides, graph::*};
/// let matrix = WeightMatrix::from_fn(4, |u, v| (v - u) as Weight);
/// let solution = christofides(&matrix).unwrap();
/// assert_eq!(solution.tour().nodes(), &[0, 1, 2, 3, 0]);
/// assert_eq!(solution.cost(), 6.0);
/// ```
pub fn christofides(matrix: &WeightMatrix) -> Result<Solution> {
    let start = Instant::now();
    let n = matrix.number_of_nodes();

    let tree = prim(matrix)?;
    let odd_nodes = tree.odd_degree_nodes()?;
    let matching = min_weight_perfect_matching(matrix, &odd_nodes)?;

    let multigraph = Multigraph::assemble(
        n,
        tree.unweighted_edges(),
        matching.edges().iter().copied(),
    )?;
    let walk = eulerian_circuit(multigraph)?;
    let tour = HamiltonianTour::shortcut(matrix, &walk)?;

    info!(
        "Christofides: n = {n}, tree {}, {} odd nodes, matching {}, tour {} ({} ms)",
        tree.weight(),
        odd_nodes.len(),
        matching.weight(),
        tour.cost(),
        start.elapsed().as_millis()
    );

    Ok(Solution {
        tree,
        odd_nodes,
        matching,
        tour,
    })
}
