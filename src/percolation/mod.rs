//! Site percolation on an n-by-n grid


mod grid;

pub use grid::*;
