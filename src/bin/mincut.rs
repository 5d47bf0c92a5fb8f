use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use karger::{karger_min_cut, load_adjacency_list, KargerConfig};

/// Estimates the global minimum cut of an adjacency-list graph
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile: one line per vertex, the vertex id followed by its neighbours
    #[arg(short, long)]
    graph: PathBuf,
    /// Number of independent trials (default: n^2)
    #[arg(short, long)]
    trials: Option<usize>,
    /// Base seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,
    /// Run trials on all cores
    #[arg(short, long)]
    parallel: bool,
    /// Also print the vertices on each side of the cut
    #[arg(long)]
    sides: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let start = Instant::now();
    let graph = match load_adjacency_list(&args.graph) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("failed to load {}: {}", args.graph.display(), err);
            return ExitCode::FAILURE;
        }
    };
    println!(
        "loaded {} vertices / {} edges in {:?}",
        graph.num_vertices(),
        graph.num_edges(),
        start.elapsed()
    );

    let mut config = KargerConfig::new().parallel(args.parallel);
    if let Some(trials) = args.trials {
        config = config.trials(trials);
    }
    if let Some(seed) = args.seed {
        config = config.seed(seed);
    }

    let start = Instant::now();
    let estimate = match karger_min_cut(&graph, &config) {
        Ok(estimate) => estimate,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    println!(
        "min cut {} (best of {} trials, trial {}, seed {}) in {:?}",
        estimate.cut.size,
        estimate.trials,
        estimate.best_trial,
        estimate.seed,
        start.elapsed()
    );
    if args.sides {
        println!("left:  {:?}", estimate.cut.left);
        println!("right: {:?}", estimate.cut.right);
    }
    ExitCode::SUCCESS
}
