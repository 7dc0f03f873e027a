use super::*;
use crate::errors::{InvariantCheck, InvariantViolation};

/// Spanning tree as produced by [`crate::mst::prim`]: `n - 1` edges and their total weight
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpanningTree {
    number_of_nodes: NumNodes,
    edges: Vec<WeightedEdge>,
    weight: Weight,
}

impl SpanningTree {
    pub fn new(number_of_nodes: NumNodes, edges: Vec<WeightedEdge>) -> Self {
        let weight = edges.iter().map(|e| e.weight()).sum();
        Self {
            number_of_nodes,
            edges,
            weight,
        }
    }

    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    pub fn unweighted_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().map(|e| e.edge())
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Returns the tree degree of every node
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.len()];
        for &WeightedEdge(u, v, _) in &self.edges {
            degrees[u as usize] += 1;
            degrees[v as usize] += 1;
        }
        degrees
    }

    /// Returns the nodes of odd tree degree in ascending order. By the handshake lemma
    /// there is an even number of them; anything else is reported as a violation.
    pub fn odd_degree_nodes(&self) -> Result<Vec<Node>, InvariantViolation> {
        let odd: Vec<Node> = self
            .degrees()
            .into_iter()
            .enumerate()
            .filter_map(|(u, d)| (d % 2 == 1).then_some(u as Node))
            .collect();

        if odd.len() % 2 != 0 {
            return Err(InvariantViolation::OddSizedOddSet { count: odd.len() });
        }

        Ok(odd)
    }
}

impl GraphNodeOrder for SpanningTree {
    fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }
}

impl GraphEdgeOrder for SpanningTree {
    fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }
}

fn find_root(parent: &mut [Node], mut u: Node) -> Node {
    while parent[u as usize] != u {
        let grand_parent = parent[parent[u as usize] as usize];
        parent[u as usize] = grand_parent;
        u = grand_parent;
    }
    u
}

impl InvariantCheck<InvariantViolation> for SpanningTree {
    fn is_correct(&self) -> Result<(), InvariantViolation> {
        let n = self.number_of_nodes();
        let expected = n.saturating_sub(1) as usize;
        if self.edges.len() != expected {
            return Err(InvariantViolation::MalformedTree(format!(
                "expected {expected} edges, found {}",
                self.edges.len()
            )));
        }

        // every edge has to merge two components; with n - 1 edges this implies a spanning tree
        let mut parent: Vec<Node> = self.vertices().collect();
        for &WeightedEdge(u, v, _) in &self.edges {
            let max = u.max(v);
            if max >= n {
                return Err(InvariantViolation::VertexOutOfRange { vertex: max, n });
            }

            let (ru, rv) = (find_root(&mut parent, u), find_root(&mut parent, v));
            if ru == rv {
                return Err(InvariantViolation::MalformedTree(format!(
                    "edge {{{u}, {v}}} closes a cycle"
                )));
            }
            parent[ru as usize] = rv;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn path_has_two_odd_nodes() {
        let tree = SpanningTree::new(
            4,
            vec![
                WeightedEdge(0, 1, 1.0),
                WeightedEdge(1, 2, 2.0),
                WeightedEdge(2, 3, 3.0),
            ],
        );

        assert_eq!(tree.weight(), 6.0);
        assert_eq!(tree.number_of_edges(), 3);
        assert_eq!(tree.degrees(), vec![1, 2, 2, 1]);
        assert_eq!(tree.odd_degree_nodes().unwrap(), vec![0, 3]);
        assert!(tree.is_correct().is_ok());
    }

    #[test]
    fn star_has_even_odd_set() {
        let tree = SpanningTree::new(
            5,
            (1..5).map(|v| WeightedEdge(0, v, v as Weight)).collect(),
        );
        assert_eq!(tree.odd_degree_nodes().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn detects_malformed_trees() {
        let cycle = SpanningTree::new(
            3,
            vec![WeightedEdge(0, 1, 1.0), WeightedEdge(1, 0, 1.0)],
        );
        assert!(matches!(
            cycle.is_correct(),
            Err(InvariantViolation::MalformedTree(_))
        ));

        let too_short = SpanningTree::new(3, vec![WeightedEdge(0, 1, 1.0)]);
        assert!(too_short.is_correct().is_err());

        assert!(SpanningTree::new(1, vec![]).is_correct().is_ok());
        assert!(SpanningTree::new(0, vec![]).is_correct().is_ok());
    }
}
