use super::*;
use crate::errors::InvariantViolation;

/// Edge multiset obtained by joining the spanning tree with the perfect matching on its odd
/// nodes. Parallel edges are kept; every node has even degree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Multigraph {
    number_of_nodes: NumNodes,
    edges: Vec<Edge>,
    degrees: Vec<usize>,
}

impl Multigraph {
    /// Concatenates both edge lists without deduplication. Fails if an endpoint lies outside
    /// of `[0, n)`, on self-loops, or if some node ends up with odd degree.
    pub fn assemble(
        number_of_nodes: NumNodes,
        tree_edges: impl IntoIterator<Item = Edge>,
        matching_edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self, InvariantViolation> {
        let mut degrees = vec![0; number_of_nodes as usize];
        let mut edges = Vec::new();

        for edge @ Edge(u, v) in tree_edges.into_iter().chain(matching_edges) {
            let max = edge.max_node();
            if max >= number_of_nodes {
                return Err(InvariantViolation::VertexOutOfRange {
                    vertex: max,
                    n: number_of_nodes,
                });
            }

            if u == v {
                return Err(InvariantViolation::SelfLoop { vertex: u });
            }

            degrees[u as usize] += 1;
            degrees[v as usize] += 1;
            edges.push(edge);
        }

        if let Some((u, &degree)) = degrees.iter().enumerate().find(|(_, d)| *d % 2 == 1) {
            return Err(InvariantViolation::OddDegree {
                vertex: u as Node,
                degree,
            });
        }

        Ok(Self {
            number_of_nodes,
            edges,
            degrees,
        })
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn degree_of(&self, u: Node) -> usize {
        self.degrees[u as usize]
    }

    pub fn degrees(&self) -> impl Iterator<Item = usize> + '_ {
        self.degrees.iter().copied()
    }
}

impl GraphNodeOrder for Multigraph {
    fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }
}

impl GraphEdgeOrder for Multigraph {
    fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }
}
