//! Error types for grid, union-find and experiment operations.

use thiserror::Error;

/// Result type for percolation operations.
pub type Result<T> = std::result::Result<T, PercolationError>;

/// Precondition violations, plus the I/O failures of the CSV result log.
#[derive(Debug, Error)]
pub enum PercolationError {
    /// A grid must have at least one site per side.
    #[error("grid side length must be positive, got {0}")]
    InvalidGridSize(usize),

    /// An experiment must run at least one trial.
    #[error("trial count must be positive, got {0}")]
    InvalidTrialCount(usize),

    /// Grid coordinates are 1-indexed and bounded by the side length.
    #[error("site ({row}, {col}) is outside a {side_length}x{side_length} grid")]
    CoordinateOutOfRange {
        row: usize,
        col: usize,
        side_length: usize,
    },

    /// Element label outside the union-find universe.
    #[error("index {index} is out of range for a disjoint set of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
