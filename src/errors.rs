use std::error::Error;

use thiserror::Error;

use crate::graph::{Node, NumNodes, Weight};

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: Error> {
    fn is_correct(&self) -> std::result::Result<(), E>;
}

/// Problems with user supplied instances. Rows and columns are 0-based matrix indices;
/// `line` refers to the 1-based line of the input text.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input is empty")]
    Empty,

    #[error("line {line}: vertex count must be an integer, found {token:?}")]
    MalformedCount { line: usize, token: String },

    #[error("vertex count must be positive, found {count}")]
    NonPositiveCount { count: i64 },

    #[error("expected {expected} matrix rows, found {found}")]
    WrongRowCount { expected: usize, found: usize },

    #[error("row {row}: expected {expected} values, found {found}")]
    WrongRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, column {column}: non-numeric weight {token:?}")]
    NonNumeric {
        row: usize,
        column: usize,
        token: String,
    },

    #[error("row {row}, column {column}: negative weight {weight}")]
    NegativeWeight {
        row: usize,
        column: usize,
        weight: Weight,
    },

    #[error("asymmetric weights: w[{row}][{column}] = {forward}, w[{column}][{row}] = {backward}")]
    Asymmetric {
        row: usize,
        column: usize,
        forward: Weight,
        backward: Weight,
    },

    #[error("no coordinates found in NODE_COORD_SECTION")]
    NoCoordinates,

    #[error("line {line}: cannot parse coordinate {token:?}")]
    MalformedCoordinate { line: usize, token: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Internal consistency faults. Any of these indicates a bug rather than bad input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("odd-degree vertex set has odd cardinality {count}")]
    OddSizedOddSet { count: usize },

    #[error("vertex {vertex} is out of range for a graph with {n} nodes")]
    VertexOutOfRange { vertex: Node, n: NumNodes },

    #[error("self-loop at vertex {vertex}")]
    SelfLoop { vertex: Node },

    #[error("vertex {vertex} has odd degree {degree} in the multigraph")]
    OddDegree { vertex: Node, degree: usize },

    #[error("edge {{{0}, {1}}} was traversed more often than it occurs")]
    EdgeOverused(Node, Node),

    #[error("{remaining} edges remain unused after the Eulerian walk")]
    UnusedEdges { remaining: usize },

    #[error("spanning tree is malformed: {0}")]
    MalformedTree(String),

    #[error("matching is not perfect: {0}")]
    ImperfectMatching(String),

    #[error("dual solution violated: {0}")]
    DualInfeasible(String),

    #[error("matching search stalled without augmenting path or dual progress")]
    StalledSearch,

    #[error("tour is not Hamiltonian: {0}")]
    NotHamiltonian(String),
}

/// Failures of the Christofides pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChristofidesError {
    #[error("graph is disconnected: vertex {vertex} cannot be reached from vertex 0")]
    GraphDisconnected { vertex: Node },

    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(#[from] InvariantViolation),
}

pub type Result<T> = std::result::Result<T, ChristofidesError>;

#[cfg(test)]
mod test {
    use super::*;

    struct EvenCount(usize);

    impl InvariantCheck<InvariantViolation> for EvenCount {
        fn is_correct(&self) -> std::result::Result<(), InvariantViolation> {
            if self.0 % 2 == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::OddSizedOddSet { count: self.0 })
            }
        }
    }

    fn checked(count: usize) -> Result<usize> {
        EvenCount(count).is_correct()?;
        Ok(count)
    }

    #[test]
    fn violations_convert_into_pipeline_errors() {
        assert_eq!(checked(4), Ok(4));
        assert_eq!(
            checked(3),
            Err(ChristofidesError::InternalInvariantViolation(
                InvariantViolation::OddSizedOddSet { count: 3 }
            ))
        );
    }
}
