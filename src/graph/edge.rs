use super::*;

pub trait EdgeOps {
    fn normalized(&self) -> Self;
    fn is_normalized(&self) -> bool;
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, serde::Serialize)]
pub struct Edge(pub Node, pub Node);

#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, serde::Serialize)]
pub struct WeightedEdge(pub Node, pub Node, pub Weight);

impl Edge {
    pub fn max_node(&self) -> Node {
        self.0.max(self.1)
    }
}

impl WeightedEdge {
    pub fn edge(&self) -> Edge {
        Edge(self.0, self.1)
    }

    pub fn weight(&self) -> Weight {
        self.2
    }
}

impl EdgeOps for Edge {
    fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }
}
