use std::io::Write;

use itertools::Itertools;
use serde::Serialize;

use crate::{christofides::Solution, graph::*};

/// Human and machine readable summary of a [`Solution`]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub number_of_nodes: NumNodes,
    pub tree_edges: Vec<WeightedEdge>,
    pub tree_weight: Weight,
    pub odd_nodes: Vec<Node>,
    pub matching: Vec<Edge>,
    pub matching_weight: Weight,
    pub tour: Vec<Node>,
    pub cost: Weight,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimum: Option<Weight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<Weight>,
}

impl Report {
    /// If `optimum` is known (and positive) the report includes the approximation ratio
    pub fn new(solution: &Solution, optimum: Option<Weight>) -> Self {
        let cost = solution.cost();
        let ratio = optimum.filter(|&opt| opt > 0.0).map(|opt| cost / opt);

        Self {
            number_of_nodes: solution.tree().number_of_nodes(),
            tree_edges: solution.tree().edges().to_vec(),
            tree_weight: solution.tree().weight(),
            odd_nodes: solution.odd_nodes().to_vec(),
            matching: solution.matching().edges().to_vec(),
            matching_weight: solution.matching().weight(),
            tour: solution.tour().nodes().to_vec(),
            cost,
            optimum,
            ratio,
        }
    }

    pub fn try_write_text<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "Minimum spanning tree:")?;
        writeln!(
            writer,
            "[{}]",
            self.tree_edges
                .iter()
                .map(|WeightedEdge(u, v, w)| format!("({u}, {v}, {w})"))
                .join(", ")
        )?;
        writeln!(writer, "Minimum spanning tree weight: {}", self.tree_weight)?;
        writeln!(writer, "Odd-degree nodes: [{}]", self.odd_nodes.iter().join(", "))?;
        writeln!(
            writer,
            "Minimum weight perfect matching: [{}] (weight {})",
            self.matching
                .iter()
                .map(|Edge(u, v)| format!("({u}, {v})"))
                .join(", "),
            self.matching_weight
        )?;
        writeln!(writer, "Tour: [{}]", self.tour.iter().join(", "))?;
        writeln!(writer, "Tour cost: {}", self.cost)?;

        if let Some(optimum) = self.optimum {
            match self.ratio {
                Some(ratio) => writeln!(writer, "Optimum: {optimum} (ratio {ratio:.4})")?,
                None => writeln!(writer, "Optimum: {optimum}")?,
            }
        }

        writer.flush()
    }

    pub fn try_write_json<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()
    }
}
