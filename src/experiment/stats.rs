//! sample statistics over per-trial thresholds

/// z-score of a two-sided 95% interval under the normal approximation
pub const CONFIDENCE_95: f64 = 1.96;

/// arithmetic mean; NaN for an empty sample
pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// sample standard deviation, dividing by `len - 1`
///
/// A single sample has no spread estimate, so this returns NaN rather than
/// dividing by zero.
pub fn stddev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return f64::NAN;
    }
    let mu = mean(samples);
    let sum_sq: f64 = samples.iter().map(|x| (x - mu) * (x - mu)).sum();
    (sum_sq / (samples.len() - 1) as f64).sqrt()
}

/// `mean ∓ 1.96 * stddev / sqrt(trials)`
pub fn confidence_interval(mean: f64, stddev: f64, trials: usize) -> (f64, f64) {
    let half_width = CONFIDENCE_95 * stddev / (trials as f64).sqrt();
    (mean - half_width, mean + half_width)
}
