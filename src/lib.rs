pub mod disjoint_set;
pub mod error;
pub mod experiment;
pub mod percolation;
pub mod util;

pub use error::{PercolationError, Result};
