use clap::{Arg, Command};
use std::path::Path;
use std::time::Instant;

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use percolation::experiment::{experiment_seed, ExperimentSummary, PercolationExperiment};
use percolation::util::threshold_log::ThresholdLog;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("threshold_scaling")
        .about("Runs one threshold experiment per grid size and appends the results to a CSV log")
        .arg(
            Arg::new("sizes")
                .long("sizes")
                .short('n')
                .value_name("N,N,...")
                .help("Comma-separated grid side lengths")
                .value_delimiter(',')
                .value_parser(clap::value_parser!(usize))
                .default_value("16,32,64,128,256"),
        )
        .arg(
            Arg::new("trials")
                .long("trials")
                .short('t')
                .value_name("COUNT")
                .help("Trials per grid size")
                .value_parser(clap::value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .short('s')
                .value_name("SEED")
                .help("Base seed; each entry of --sizes runs on its own generator derived from it")
                .value_parser(clap::value_parser!(u64))
                .default_value("0"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("CSV file to append results to")
                .default_value("outputs/thresholds.csv"),
        )
        .get_matches();

    let sizes: Vec<usize> = matches.get_many::<usize>("sizes").unwrap().copied().collect();
    let trials = *matches.get_one::<usize>("trials").unwrap();
    let seed = *matches.get_one::<u64>("seed").unwrap();
    let output_path = Path::new(matches.get_one::<String>("output").unwrap());

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // open before running so a bad path fails fast
    let mut log = ThresholdLog::open(output_path)?;

    let pb = ProgressBar::new(sizes.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} {wide_bar:.green/gray} {pos}/{len} [{elapsed_precise}]({eta})")
            .unwrap()
            .progress_chars("█▓░"),
    );
    pb.set_message("Running experiments");

    // each experiment runs its trials sequentially on its own generator
    let summaries = sizes
        .par_iter()
        .enumerate()
        .progress_with(pb.clone())
        .map(|(position, &n)| {
            let mut rng = StdRng::seed_from_u64(experiment_seed(seed, position, n));
            let start = Instant::now();
            let experiment = PercolationExperiment::with_rng(n, trials, &mut rng)?;
            Ok(experiment.summary(start.elapsed()))
        })
        .collect::<percolation::Result<Vec<ExperimentSummary>>>()?;

    pb.finish_and_clear();

    for summary in &summaries {
        println!(
            "n = {:>5}: mean {:.5}, stddev {:.5}, 95% CI [{:.5}, {:.5}] in {:.3} seconds",
            summary.side_length,
            summary.mean,
            summary.stddev,
            summary.confidence_low,
            summary.confidence_high,
            summary.seconds
        );
        log.append(summary)?;
    }
    println!("appended {} rows to {}", summaries.len(), output_path.display());

    Ok(())
}
