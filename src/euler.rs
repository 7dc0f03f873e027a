//! Eulerian circuits of even-degree multigraphs via Hierholzer's algorithm.

use fxhash::FxHashMap;
use log::debug;

use crate::{errors::InvariantViolation, graph::*};

/// Traversal state owned by a single run of [`eulerian_circuit`]: the unused part of every
/// adjacency list and, per undirected edge, how many parallel copies are still unused.
struct EulerState {
    adjacency: Vec<Vec<Node>>,
    multiplicity: FxHashMap<Edge, u32>,
    remaining: usize,
}

impl EulerState {
    fn new(graph: &Multigraph) -> Self {
        let mut adjacency = vec![Vec::new(); graph.len()];
        let mut multiplicity = FxHashMap::default();

        for &Edge(u, v) in graph.edges() {
            adjacency[u as usize].push(v);
            adjacency[v as usize].push(u);
            *multiplicity.entry(Edge(u, v).normalized()).or_insert(0) += 1;
        }

        // lists are consumed from the back; sorting descending visits small neighbors first
        for neighbors in &mut adjacency {
            neighbors.sort_unstable_by(|a, b| b.cmp(a));
        }

        Self {
            adjacency,
            multiplicity,
            remaining: graph.edges().len(),
        }
    }

    /// Consumes one unused edge at `u` and returns its other endpoint, or None if all edges
    /// at `u` are used up.
    fn take_edge(&mut self, u: Node) -> Result<Option<Node>, InvariantViolation> {
        let Some(v) = self.adjacency[u as usize].pop() else {
            return Ok(None);
        };

        match self.multiplicity.get_mut(&Edge(u, v).normalized()) {
            Some(copies) if *copies > 0 => *copies -= 1,
            _ => return Err(InvariantViolation::EdgeOverused(u, v)),
        }

        let mirrored = &mut self.adjacency[v as usize];
        let pos = mirrored
            .iter()
            .rposition(|&x| x == u)
            .ok_or(InvariantViolation::EdgeOverused(u, v))?;
        mirrored.remove(pos);

        self.remaining -= 1;
        Ok(Some(v))
    }

    fn unused_edges(&self) -> usize {
        self.multiplicity.values().map(|&c| c as usize).sum()
    }
}

/// Computes a closed walk using every edge of `graph` exactly once. The walk starts and ends
/// at the smallest non-isolated node and has `m + 1` entries; an edgeless graph yields an
/// empty walk. Whenever there is a choice, the smallest unused neighbor is taken.
///
/// Edges left over after the walk closed (i.e. the graph is disconnected) are reported as an
/// [`InvariantViolation`], as the spanning tree inside the multigraph rules this out.
pub fn eulerian_circuit(graph: Multigraph) -> Result<Vec<Node>, InvariantViolation> {
    let Some(start) = graph.vertices().find(|&u| graph.degree_of(u) > 0) else {
        return Ok(Vec::new());
    };

    let mut state = EulerState::new(&graph);
    let mut walk = Vec::with_capacity(graph.edges().len() + 1);
    let mut stack = vec![start];

    while let Some(&u) = stack.last() {
        match state.take_edge(u)? {
            Some(v) => stack.push(v),
            None => {
                walk.push(u);
                stack.pop();
            }
        }
    }

    if state.remaining > 0 {
        return Err(InvariantViolation::UnusedEdges {
            remaining: state.unused_edges(),
        });
    }

    walk.reverse();
    debug!("Euler: closed walk of length {}", walk.len());

    Ok(walk)
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn assert_is_eulerian_circuit(graph: &Multigraph, walk: &[Node]) {
        assert_eq!(walk.len(), graph.edges().len() + 1);
        assert_eq!(walk.first(), walk.last());

        let used = walk
            .iter()
            .tuple_windows()
            .map(|(&u, &v)| Edge(u, v).normalized())
            .sorted()
            .collect_vec();
        let expected = graph
            .edges()
            .iter()
            .map(|e| e.normalized())
            .sorted()
            .collect_vec();
        assert_eq!(used, expected);
    }

    #[test]
    fn empty_graph() {
        let graph = Multigraph::assemble(1, Vec::new(), Vec::new()).unwrap();
        assert!(eulerian_circuit(graph).unwrap().is_empty());
    }

    #[test]
    fn parallel_edges_are_used_twice() {
        let graph = Multigraph::assemble(2, [Edge(0, 1)], [Edge(0, 1)]).unwrap();
        assert_eq!(eulerian_circuit(graph).unwrap(), vec![0, 1, 0]);
    }

    #[test]
    fn bowtie() {
        let graph = Multigraph::assemble(
            5,
            [Edge(0, 1), Edge(1, 2), Edge(2, 0), Edge(2, 3)],
            [Edge(3, 4), Edge(4, 2)],
        )
        .unwrap();

        let walk = eulerian_circuit(graph.clone()).unwrap();
        assert_is_eulerian_circuit(&graph, &walk);
        assert_eq!(walk, vec![0, 1, 2, 3, 4, 2, 0]);
    }

    #[test]
    fn disconnected_multigraph() {
        let graph = Multigraph::assemble(
            6,
            [Edge(0, 1), Edge(1, 2), Edge(2, 0)],
            [Edge(3, 4), Edge(4, 5), Edge(5, 3)],
        )
        .unwrap();

        assert_eq!(
            eulerian_circuit(graph),
            Err(InvariantViolation::UnusedEdges { remaining: 3 })
        );
    }

    #[test]
    fn random_even_graphs() {
        let mut rng = Pcg64::seed_from_u64(31337);
        for _ in 0..200 {
            // unions of random closed walks through node 0 are connected and even
            let n: Node = rng.gen_range(2..12);
            let mut edges = Vec::new();
            for _ in 0..rng.gen_range(1..4) {
                let len = rng.gen_range(2..8);
                let mut cycle = vec![0];
                cycle.extend((0..len).map(|_| rng.gen_range(0..n)));
                cycle.push(0);
                cycle.dedup();
                if cycle.len() < 3 {
                    continue;
                }
                edges.extend(cycle.iter().tuple_windows().map(|(&u, &v)| Edge(u, v)));
            }

            let graph = Multigraph::assemble(n, edges, Vec::new()).unwrap();
            let walk = eulerian_circuit(graph.clone()).unwrap();
            if graph.edges().is_empty() {
                assert!(walk.is_empty());
            } else {
                assert_is_eulerian_circuit(&graph, &walk);
            }
        }
    }
}
