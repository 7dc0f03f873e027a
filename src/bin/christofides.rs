use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use ::log::{LevelFilter, info};
use christofides::{log::build_logger_for_verbosity, prelude::*};
use structopt::StructOpt;

/// Approximates a metric TSP tour with Christofides' algorithm
#[derive(Debug, StructOpt)]
struct Opts {
    /// Instance file (count line and n rows of weights); reads stdin if omitted
    #[structopt(short, long, parse(from_os_str))]
    instance: Option<PathBuf>,

    /// Report destination; stdout if omitted
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Write the report as JSON
    #[structopt(long)]
    json: bool,

    /// Known optimal tour cost; adds the approximation ratio to the report
    #[structopt(long)]
    optimum: Option<f64>,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn load_matrix(path: &Option<PathBuf>) -> anyhow::Result<WeightMatrix> {
    if let Some(path) = path {
        Ok(WeightMatrix::try_read_matrix_file(path)?)
    } else {
        let stdin = std::io::stdin().lock();
        Ok(WeightMatrix::try_read_matrix(stdin)?)
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_logger_for_verbosity(LevelFilter::Warn, opts.verbose);

    let matrix = load_matrix(&opts.instance)?;
    info!("Loaded instance with {} nodes", matrix.number_of_nodes());

    let solution = christofides(&matrix)?;
    let report = Report::new(&solution, opts.optimum);

    let writer: Box<dyn Write> = match &opts.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };

    if opts.json {
        report.try_write_json(writer)?;
    } else {
        report.try_write_text(writer)?;
    }

    Ok(())
}
