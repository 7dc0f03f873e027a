use std::{fs::File, io::Write, path::Path};

use itertools::Itertools;

use crate::graph::*;

/// Writes a matrix in the format understood by [`super::MatrixReader`]: the number of nodes
/// followed by one bracketed, comma separated row per node. Weights are printed with
/// `decimals` places; missing edges as `inf`.
pub trait MatrixWriter {
    fn try_write_matrix<W: Write>(&self, writer: W, decimals: usize) -> std::io::Result<()>;

    fn try_write_matrix_file<P: AsRef<Path>>(
        &self,
        path: P,
        decimals: usize,
    ) -> std::io::Result<()> {
        let writer = std::io::BufWriter::new(File::create(path)?);
        self.try_write_matrix(writer, decimals)
    }
}

impl MatrixWriter for WeightMatrix {
    fn try_write_matrix<W: Write>(&self, mut writer: W, decimals: usize) -> std::io::Result<()> {
        writeln!(writer, "{}", self.number_of_nodes())?;
        for row in self.rows() {
            writeln!(
                writer,
                "[{}]",
                row.iter().map(|w| format!("{w:.decimals$}")).join(", ")
            )?;
        }
        writer.flush()
    }
}
