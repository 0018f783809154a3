//! Monte Carlo estimation of the percolation threshold

pub mod stats;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use itertools::iproduct;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{PercolationError, Result};
use crate::percolation::PercolationGrid;

#[cfg(feature = "verbose_trials")]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        println!($($arg)*);
    }
}

#[cfg(not(feature = "verbose_trials"))]
macro_rules! verbose_println {
    ($($arg:tt)*) => {};
}

/// Runs one trial on a fresh grid and returns the open fraction at which it
/// first percolated.
///
/// Every site is opened at most once, in an order drawn uniformly from all
/// permutations of the grid.
pub fn run_trial<R: Rng + ?Sized>(side_length: usize, rng: &mut R) -> Result<f64> {
    let mut grid = PercolationGrid::new(side_length)?;

    let mut order: Vec<(usize, usize)> = iproduct!(1..=side_length, 1..=side_length).collect();
    order.shuffle(rng);

    for (row, col) in order {
        grid.open(row, col)?;
        if grid.percolates() {
            return Ok(grid.open_fraction());
        }
    }

    // unreachable in practice: opening the last site always percolates inside the loop
    Ok(grid.open_fraction())
}

/// Derives the seed for the experiment at `position` in a batch of grid sizes.
///
/// Repeated sizes in one batch get different generators, so they act as
/// independent replicates.
pub fn experiment_seed(base: u64, position: usize, side_length: usize) -> u64 {
    base.wrapping_add((position as u64).rotate_left(32))
        .wrapping_add(side_length as u64)
}

/// Thresholds from `trials` independent runs on `n`-by-`n` grids.
pub struct PercolationExperiment {
    side_length: usize,
    thresholds: Vec<f64>,
}

impl PercolationExperiment {
    /// runs the experiment with the thread-local generator
    pub fn new(side_length: usize, trials: usize) -> Result<PercolationExperiment> {
        Self::with_rng(side_length, trials, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        side_length: usize,
        trials: usize,
        rng: &mut R,
    ) -> Result<PercolationExperiment> {
        let thresholds = run_trials(side_length, trials, rng, None)?;

        Ok(PercolationExperiment {
            side_length,
            thresholds,
        })
    }

    pub fn with_progress_bar<R: Rng + ?Sized>(
        side_length: usize,
        trials: usize,
        rng: &mut R,
    ) -> Result<PercolationExperiment> {
        validate(side_length, trials)?;

        let pb = ProgressBar::new(trials as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} {wide_bar:.green/gray} {pos}/{len} [{elapsed_precise}]({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        pb.set_message(format!("Percolating {side_length}x{side_length} grids"));

        let thresholds = run_trials(side_length, trials, rng, Some(&pb))?;

        pb.finish_with_message(format!("{trials} trials on {side_length}x{side_length} grids"));

        Ok(PercolationExperiment {
            side_length,
            thresholds,
        })
    }

    pub fn side_length(&self) -> usize {
        self.side_length
    }

    pub fn trials(&self) -> usize {
        self.thresholds.len()
    }

    /// per-trial thresholds in the order the trials ran
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// sample mean of the percolation threshold
    pub fn mean(&self) -> f64 {
        stats::mean(&self.thresholds)
    }

    /// sample standard deviation of the percolation threshold; NaN for a single trial
    pub fn stddev(&self) -> f64 {
        stats::stddev(&self.thresholds)
    }

    /// 95% confidence interval, with half-width `1.96 * stddev / sqrt(trials)`
    pub fn confidence_interval(&self) -> (f64, f64) {
        stats::confidence_interval(self.mean(), self.stddev(), self.trials())
    }

    pub fn confidence_low(&self) -> f64 {
        self.confidence_interval().0
    }

    pub fn confidence_high(&self) -> f64 {
        self.confidence_interval().1
    }

    /// collects the statistics into a single row, `elapsed` being the wall time of the run
    pub fn summary(&self, elapsed: Duration) -> ExperimentSummary {
        let (confidence_low, confidence_high) = self.confidence_interval();
        ExperimentSummary {
            side_length: self.side_length,
            trials: self.trials(),
            mean: self.mean(),
            stddev: self.stddev(),
            confidence_low,
            confidence_high,
            seconds: elapsed.as_secs_f64(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentSummary {
    pub side_length: usize,
    pub trials: usize,
    pub mean: f64,
    pub stddev: f64,
    pub confidence_low: f64,
    pub confidence_high: f64,
    pub seconds: f64,
}

fn validate(side_length: usize, trials: usize) -> Result<()> {
    if side_length == 0 {
        return Err(PercolationError::InvalidGridSize(side_length));
    }
    if trials == 0 {
        return Err(PercolationError::InvalidTrialCount(trials));
    }
    Ok(())
}

/// runs every trial in order on the one generator, ticking `progress` after each
fn run_trials<R: Rng + ?Sized>(
    side_length: usize,
    trials: usize,
    rng: &mut R,
    progress: Option<&ProgressBar>,
) -> Result<Vec<f64>> {
    validate(side_length, trials)?;

    (0..trials)
        .map(|i| -> Result<f64> {
            let threshold = logged_trial(i, side_length, &mut *rng)?;
            if let Some(pb) = progress {
                pb.inc(1);
            }
            Ok(threshold)
        })
        .collect()
}

#[allow(unused_variables)]
fn logged_trial<R: Rng + ?Sized>(trial: usize, side_length: usize, rng: &mut R) -> Result<f64> {
    let threshold = run_trial(side_length, rng)?;
    verbose_println!("Trial {}: percolated at {:.4}", trial, threshold);
    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn single_site_always_needs_one_opening() {
        let mut rng = StdRng::seed_from_u64(1);
        let experiment = PercolationExperiment::with_rng(1, 100, &mut rng).unwrap();
        assert_eq!(experiment.trials(), 100);
        assert!(experiment.thresholds().iter().all(|&t| t == 1.0));
        assert_eq!(experiment.mean(), 1.0);
        assert_eq!(experiment.stddev(), 0.0);
        assert_eq!(experiment.confidence_low(), 1.0);
        assert_eq!(experiment.confidence_high(), 1.0);
    }

    #[test]
    fn thresholds_lie_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 10;
        let experiment = PercolationExperiment::with_rng(n, 50, &mut rng).unwrap();
        for &t in experiment.thresholds() {
            // at least one full column is needed, and at most every site
            assert!(t >= n as f64 / (n * n) as f64);
            assert!(t <= 1.0);
        }
        let (lo, hi) = experiment.confidence_interval();
        assert!(lo <= experiment.mean() && experiment.mean() <= hi);
    }

    #[test]
    fn estimate_is_near_known_threshold() {
        let mut rng = StdRng::seed_from_u64(2017);
        let experiment = PercolationExperiment::with_rng(40, 200, &mut rng).unwrap();
        // site percolation threshold on the square lattice is about 0.5927
        assert!((experiment.mean() - 0.5927).abs() < 0.03);
        assert!(experiment.stddev() > 0.0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = PercolationExperiment::with_rng(8, 20, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = PercolationExperiment::with_rng(8, 20, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a.thresholds(), b.thresholds());
    }

    #[test]
    fn progress_bar_run_matches_plain_run() {
        let plain = PercolationExperiment::with_rng(6, 15, &mut StdRng::seed_from_u64(21)).unwrap();
        let tracked =
            PercolationExperiment::with_progress_bar(6, 15, &mut StdRng::seed_from_u64(21)).unwrap();
        assert_eq!(plain.thresholds(), tracked.thresholds());
        assert!(matches!(
            PercolationExperiment::with_progress_bar(6, 0, &mut StdRng::seed_from_u64(21)),
            Err(PercolationError::InvalidTrialCount(0))
        ));
    }

    #[test]
    fn repeated_sizes_get_distinct_seeds() {
        let sizes = [64, 64, 32, 64];
        let seeds: Vec<u64> = sizes
            .iter()
            .enumerate()
            .map(|(position, &n)| experiment_seed(7, position, n))
            .collect();
        for i in 0..seeds.len() {
            for j in (i + 1)..seeds.len() {
                assert_ne!(seeds[i], seeds[j]);
            }
        }

        let first = PercolationExperiment::with_rng(16, 10, &mut StdRng::seed_from_u64(seeds[0])).unwrap();
        let second = PercolationExperiment::with_rng(16, 10, &mut StdRng::seed_from_u64(seeds[1])).unwrap();
        assert_ne!(first.thresholds(), second.thresholds());
        // same position and size reproduce the same seed
        assert_eq!(experiment_seed(7, 1, 64), seeds[1]);
    }

    #[test]
    fn single_trial_reports_nan_spread() {
        let mut rng = StdRng::seed_from_u64(3);
        let experiment = PercolationExperiment::with_rng(5, 1, &mut rng).unwrap();
        assert!(experiment.mean() > 0.0);
        assert!(experiment.stddev().is_nan());
        assert!(experiment.confidence_low().is_nan());
        assert!(experiment.confidence_high().is_nan());
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(matches!(
            PercolationExperiment::new(0, 10),
            Err(PercolationError::InvalidGridSize(0))
        ));
        assert!(matches!(
            PercolationExperiment::new(10, 0),
            Err(PercolationError::InvalidTrialCount(0))
        ));
        // grid size is checked first
        assert!(matches!(
            PercolationExperiment::new(0, 0),
            Err(PercolationError::InvalidGridSize(0))
        ));
    }

    #[test]
    fn trial_thresholds_are_multiples_of_one_site() {
        let mut rng = StdRng::seed_from_u64(9);
        let n = 4;
        for _ in 0..20 {
            let t = run_trial(n, &mut rng).unwrap();
            let opened = t * (n * n) as f64;
            assert!((opened - opened.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn summary_carries_statistics() {
        let mut rng = StdRng::seed_from_u64(8);
        let experiment = PercolationExperiment::with_rng(6, 30, &mut rng).unwrap();
        let summary = experiment.summary(Duration::from_millis(1500));
        assert_eq!(summary.side_length, 6);
        assert_eq!(summary.trials, 30);
        assert_eq!(summary.mean, experiment.mean());
        assert_eq!(summary.confidence_high, experiment.confidence_high());
        assert_eq!(summary.seconds, 1.5);
    }
}
