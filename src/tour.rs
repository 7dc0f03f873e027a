//! Turning closed walks into Hamiltonian cycles.

use itertools::Itertools;

use crate::{
    errors::{InvariantCheck, InvariantViolation},
    graph::*,
};

/// A closed tour: every node exactly once, followed by the first node again
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HamiltonianTour {
    number_of_nodes: NumNodes,
    nodes: Vec<Node>,
    cost: Weight,
}

impl HamiltonianTour {
    /// Shortcuts `walk` by keeping only the first occurrence of every node and closing the
    /// cycle; the cost is evaluated on `matrix`. An empty walk yields `[0, 0]` for a single
    /// node graph and an empty tour for the empty graph.
    ///
    /// # Example
    /// ```
    /// use christofides::{graph::*, tour::HamiltonianTour};
    /// let matrix = WeightMatrix::from_fn(3, |_, _| 2.0);
    /// let tour = HamiltonianTour::shortcut(&matrix, &[0, 1, 0, 2, 0]).unwrap();
    /// assert_eq!(tour.nodes(), &[0, 1, 2, 0]);
    /// assert_eq!(tour.cost(), 6.0);
    /// ```
    pub fn shortcut(matrix: &WeightMatrix, walk: &[Node]) -> Result<Self, InvariantViolation> {
        let n = matrix.number_of_nodes();
        let mut seen = vec![false; matrix.len()];
        let mut nodes = Vec::with_capacity(matrix.len() + 1);

        for &u in walk {
            if u >= n {
                return Err(InvariantViolation::VertexOutOfRange { vertex: u, n });
            }
            if !std::mem::replace(&mut seen[u as usize], true) {
                nodes.push(u);
            }
        }

        if nodes.is_empty() && n == 1 {
            nodes.push(0);
        }
        if let Some(&first) = nodes.first() {
            nodes.push(first);
        }

        let tour = Self {
            number_of_nodes: n,
            cost: tour_cost(matrix, &nodes),
            nodes,
        };
        tour.is_correct()?;

        Ok(tour)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn cost(&self) -> Weight {
        self.cost
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes.iter().tuple_windows().map(|(&u, &v)| Edge(u, v))
    }
}

/// Sums the weights of consecutive node pairs of `nodes`
pub fn tour_cost<G: WeightLookup>(graph: &G, nodes: &[Node]) -> Weight {
    nodes
        .iter()
        .tuple_windows()
        .map(|(&u, &v)| graph.weight(u, v))
        .sum()
}

impl InvariantCheck<InvariantViolation> for HamiltonianTour {
    fn is_correct(&self) -> Result<(), InvariantViolation> {
        let n = self.number_of_nodes as usize;
        if n == 0 {
            return if self.nodes.is_empty() {
                Ok(())
            } else {
                Err(InvariantViolation::NotHamiltonian(
                    "non-empty tour of empty graph".into(),
                ))
            };
        }

        if self.nodes.len() != n + 1 {
            return Err(InvariantViolation::NotHamiltonian(format!(
                "expected {} entries, found {}",
                n + 1,
                self.nodes.len()
            )));
        }

        if self.nodes.first() != self.nodes.last() {
            return Err(InvariantViolation::NotHamiltonian(
                "tour is not closed".into(),
            ));
        }

        let mut visits = vec![0usize; n];
        for &u in &self.nodes[..n] {
            match visits.get_mut(u as usize) {
                Some(count) => *count += 1,
                None => {
                    return Err(InvariantViolation::VertexOutOfRange {
                        vertex: u,
                        n: self.number_of_nodes,
                    });
                }
            }
        }

        if let Some(u) = visits.iter().position(|&c| c != 1) {
            return Err(InvariantViolation::NotHamiltonian(format!(
                "node {u} is visited {} times",
                visits[u]
            )));
        }

        Ok(())
    }
}
