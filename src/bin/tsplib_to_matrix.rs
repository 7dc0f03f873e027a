use std::path::PathBuf;

use ::log::{LevelFilter, info};
use christofides::{io::TSPLIB_DECIMALS, log::build_logger_for_verbosity, prelude::*};
use structopt::StructOpt;

/// Converts the NODE_COORD_SECTION of a TSPLIB file into a distance matrix
#[derive(Debug, StructOpt)]
struct Opts {
    #[structopt(short, long, parse(from_os_str))]
    input: PathBuf,

    /// Destination of the matrix; stdout if omitted
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_logger_for_verbosity(LevelFilter::Warn, opts.verbose);

    let matrix = read_tsplib_matrix_file(&opts.input)?;
    info!(
        "Converted {} with {} nodes",
        opts.input.display(),
        matrix.number_of_nodes()
    );

    let decimals = TSPLIB_DECIMALS as usize;
    match &opts.output {
        Some(path) => matrix.try_write_matrix_file(path, decimals)?,
        None => matrix.try_write_matrix(std::io::stdout().lock(), decimals)?,
    }

    Ok(())
}
