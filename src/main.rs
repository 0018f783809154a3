use clap::{Arg, ArgAction, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

use percolation::experiment::PercolationExperiment;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("percolation_stats")
        .version("0.1.0")
        .about("Estimates the site percolation threshold of an n-by-n grid by Monte Carlo simulation")
        .arg(
            Arg::new("n")
                .value_name("N")
                .help("Grid side length")
                .value_parser(clap::value_parser!(usize))
                .required(true),
        )
        .arg(
            Arg::new("trials")
                .value_name("TRIALS")
                .help("Number of independent trials")
                .value_parser(clap::value_parser!(usize))
                .required(true),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .short('s')
                .value_name("SEED")
                .help("Seed for a reproducible run. If not provided, the thread-local generator is used.")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .short('p')
                .help("Show a progress bar over trials")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let n = *matches.get_one::<usize>("n").unwrap();
    let trials = *matches.get_one::<usize>("trials").unwrap();

    let mut rng = match matches.get_one::<u64>("seed") {
        Some(&seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let start = Instant::now();
    let experiment = if matches.get_flag("progress") {
        PercolationExperiment::with_progress_bar(n, trials, &mut rng)?
    } else {
        PercolationExperiment::with_rng(n, trials, &mut rng)?
    };
    let elapsed = start.elapsed();

    println!("mean                    = {}", experiment.mean());
    println!("stddev                  = {}", experiment.stddev());
    println!(
        "95% confidence interval = [{}, {}]",
        experiment.confidence_low(),
        experiment.confidence_high()
    );
    println!(
        "ran {} trials in {}.{:03} seconds",
        trials,
        elapsed.as_secs(),
        elapsed.subsec_millis()
    );

    Ok(())
}
