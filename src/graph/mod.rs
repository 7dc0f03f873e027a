pub mod edge;
pub mod generators;
pub mod matrix;
pub mod multigraph;
pub mod tree;

pub type Node = u32;
pub type NumNodes = Node;
pub type NumEdges = u64;
pub type Weight = f64;

/// Absolute tolerance used for symmetry checks and slack comparisons
pub const EPSILON: Weight = 1e-6;

use std::ops::Range;

pub use edge::*;
pub use generators::*;
pub use matrix::*;
pub use multigraph::*;
pub use tree::*;

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;
}

/// Read access to edge weights
pub trait WeightLookup: GraphNodeOrder {
    /// Returns the weight of the edge {u, v}.
    /// ** Panics if u, v >= n **
    fn weight(&self, u: Node, v: Node) -> Weight;

    /// Returns true exactly if the edge {u, v} exists, i.e. carries a finite weight
    fn has_edge(&self, u: Node, v: Node) -> bool {
        u != v && self.weight(u, v).is_finite()
    }

    /// Sums the weights of the given edges
    fn total_weight<I: IntoIterator<Item = Edge>>(&self, edges: I) -> Weight {
        edges.into_iter().map(|Edge(u, v)| self.weight(u, v)).sum()
    }
}
