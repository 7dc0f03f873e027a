use std::path::PathBuf;

use ::log::{LevelFilter, info};
use christofides::{log::build_logger_for_verbosity, prelude::*};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use structopt::StructOpt;

/// Generates a random Euclidean instance: uniform points in a square
#[derive(Debug, StructOpt)]
struct Opts {
    #[structopt(short, long, default_value = "100")]
    nodes: NumNodes,

    #[structopt(short, long)]
    seed: Option<u64>,

    /// Side length of the square
    #[structopt(long, default_value = "1000")]
    side: f64,

    /// Number of decimals written per distance
    #[structopt(short, long, default_value = "1")]
    decimals: i32,

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

    anyhow::ensure!(opts.side > 0.0, "side length must be positive");
    anyhow::ensure!(opts.decimals >= 0, "number of decimals must not be negative");

    let seed = opts.seed.unwrap_or_else(rand::random);
    info!("Generating {} points with seed {seed}", opts.nodes);

    let mut rng = Pcg64::seed_from_u64(seed);
    let points = random_points(&mut rng, opts.nodes, opts.side);
    let matrix = euclidean_matrix(&points, Some(opts.decimals));

    let decimals = opts.decimals as usize;
    match &opts.output {
        Some(path) => matrix.try_write_matrix_file(path, decimals)?,
        None => matrix.try_write_matrix(std::io::stdout().lock(), decimals)?,
    }

    Ok(())
}
