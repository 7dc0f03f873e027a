use super::*;
use crate::errors::InputError;

/// Dense, symmetric weight matrix of a complete graph. Entries are non-negative; an infinite
/// entry marks a missing edge. The diagonal is never read.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightMatrix {
    number_of_nodes: NumNodes,
    weights: Vec<Weight>,
}

impl WeightMatrix {
    /// Validates `rows` and builds the matrix. Checks are carried out row by row: length,
    /// numeric value, sign; afterwards symmetry within [`EPSILON`].
    ///
    /// # Example
    /// ```
    /// use christofides::graph::*;
    /// let matrix = WeightMatrix::try_from_rows(&[[0.0, 2.0], [2.0, 0.0]]).unwrap();
    /// assert_eq!(matrix.weight(0, 1), 2.0);
    /// ```
    pub fn try_from_rows<R: AsRef<[Weight]>>(rows: &[R]) -> Result<Self, InputError> {
        let n = rows.len();
        let mut weights = Vec::with_capacity(n * n);

        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != n {
                return Err(InputError::WrongRowLength {
                    row,
                    expected: n,
                    found: values.len(),
                });
            }

            for (column, &weight) in values.iter().enumerate() {
                if weight.is_nan() {
                    return Err(InputError::NonNumeric {
                        row,
                        column,
                        token: weight.to_string(),
                    });
                }

                if weight < 0.0 {
                    return Err(InputError::NegativeWeight {
                        row,
                        column,
                        weight,
                    });
                }
            }

            weights.extend_from_slice(values);
        }

        let matrix = Self {
            number_of_nodes: n as NumNodes,
            weights,
        };
        matrix.check_symmetry()?;

        Ok(matrix)
    }

    /// Builds a matrix by evaluating `weight_of(u, v)` once for every `u < v` and mirroring
    /// the result. No validation takes place; intended for generators.
    pub fn from_fn<F: FnMut(Node, Node) -> Weight>(n: NumNodes, mut weight_of: F) -> Self {
        let len = n as usize;
        let mut weights = vec![0.0; len * len];
        for u in 0..n {
            for v in (u + 1)..n {
                let w = weight_of(u, v);
                debug_assert!(w >= 0.0);
                weights[u as usize * len + v as usize] = w;
                weights[v as usize * len + u as usize] = w;
            }
        }

        Self {
            number_of_nodes: n,
            weights,
        }
    }

    fn check_symmetry(&self) -> Result<(), InputError> {
        for u in self.vertices() {
            for v in (u + 1)..self.number_of_nodes() {
                let forward = self.weight(u, v);
                let backward = self.weight(v, u);

                let symmetric = if forward.is_infinite() || backward.is_infinite() {
                    forward == backward
                } else {
                    (forward - backward).abs() <= EPSILON
                };

                if !symmetric {
                    return Err(InputError::Asymmetric {
                        row: u as usize,
                        column: v as usize,
                        forward,
                        backward,
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns the weights of all edges incident to `u` (including the diagonal entry)
    pub fn row(&self, u: Node) -> &[Weight] {
        let n = self.len();
        let begin = u as usize * n;
        &self.weights[begin..begin + n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Weight]> + '_ {
        self.vertices().map(|u| self.row(u))
    }

    /// Returns the complete subgraph induced by `nodes`; node `i` of the result corresponds
    /// to `nodes[i]`.
    pub fn induced(&self, nodes: &[Node]) -> WeightMatrix {
        let k = nodes.len();
        let mut weights = Vec::with_capacity(k * k);
        for &u in nodes {
            weights.extend(nodes.iter().map(|&v| self.weight(u, v)));
        }

        Self {
            number_of_nodes: k as NumNodes,
            weights,
        }
    }

    /// Returns the largest finite off-diagonal weight or None if there is none
    pub fn max_finite_weight(&self) -> Option<Weight> {
        self.vertices()
            .flat_map(|u| ((u + 1)..self.number_of_nodes()).map(move |v| (u, v)))
            .map(|(u, v)| self.weight(u, v))
            .filter(|w| w.is_finite())
            .reduce(Weight::max)
    }
}

impl GraphNodeOrder for WeightMatrix {
    fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }
}

impl WeightLookup for WeightMatrix {
    fn weight(&self, u: Node, v: Node) -> Weight {
        debug_assert!(u < self.number_of_nodes && v < self.number_of_nodes);
        self.weights[u as usize * self.len() + v as usize]
    }
}
