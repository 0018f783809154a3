//! open/closed site state backed by union-finds with virtual top and bottom rows

use crate::disjoint_set::DisjointSet;
use crate::error::{PercolationError, Result};

/// An n-by-n grid of sites, all blocked at construction.
///
/// Sites are addressed with 1-indexed `(row, col)` coordinates. Internally the
/// site at `(row, col)` carries the label `(row - 1) * n + (col - 1)`; labels
/// `n * n` and `n * n + 1` are the virtual top and bottom sites, which stand in
/// for the whole first and last row respectively.
///
/// `sites` holds both virtual sites and answers `percolates`. `fullness` holds
/// only the top one and answers `is_full`: once the grid percolates, the
/// bottom virtual site would otherwise join every bottom-connected site to the
/// top.
pub struct PercolationGrid {
    side_length: usize,
    open: Box<[bool]>,
    open_count: usize,
    sites: DisjointSet,
    fullness: DisjointSet,
}

impl PercolationGrid {
    pub fn new(side_length: usize) -> Result<PercolationGrid> {
        if side_length == 0 {
            return Err(PercolationError::InvalidGridSize(side_length));
        }
        let grid_size = side_length
            .checked_mul(side_length)
            .filter(|size| size.checked_add(2).is_some())
            .ok_or(PercolationError::InvalidGridSize(side_length))?;

        Ok(PercolationGrid {
            side_length,
            open: vec![false; grid_size].into_boxed_slice(),
            open_count: 0,
            sites: DisjointSet::new(grid_size + 2),
            fullness: DisjointSet::new(grid_size + 1),
        })
    }

    pub fn side_length(&self) -> usize {
        self.side_length
    }

    /// opens a site and connects it to its open neighbors; re-opening is a no-op
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let site = self.label(row, col)?;
        if self.open[site] {
            return Ok(());
        }
        self.open[site] = true;
        self.open_count += 1;

        let n = self.side_length;
        if row > 1 {
            self.connect_if_open(site, site - n)?;
        }
        if row < n {
            self.connect_if_open(site, site + n)?;
        }
        if col > 1 {
            self.connect_if_open(site, site - 1)?;
        }
        if col < n {
            self.connect_if_open(site, site + 1)?;
        }

        // not else-if: a 1x1 grid touches both virtual sites
        if row == 1 {
            let top = self.top();
            self.sites.union(top, site)?;
            self.fullness.union(top, site)?;
        }
        if row == n {
            self.sites.union(self.bottom(), site)?;
        }
        Ok(())
    }

    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let site = self.label(row, col)?;
        Ok(self.open[site])
    }

    /// true iff the site is open and connected to the top row.
    ///
    /// Answered from the top-only union-find, so a site reachable from the
    /// bottom row alone is never reported full, even after percolation.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool> {
        let site = self.label(row, col)?;
        if !self.open[site] {
            return Ok(false);
        }
        self.fullness.connected(self.top(), site)
    }

    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// fraction of the grid's sites that are open
    pub fn open_fraction(&self) -> f64 {
        self.open_count as f64 / self.open.len() as f64
    }

    /// whether the top and bottom rows are joined through open sites
    pub fn percolates(&mut self) -> bool {
        let (top, bottom) = (self.top(), self.bottom());
        // both labels are in range by construction
        self.sites.connected(top, bottom).unwrap_or(false)
    }

    fn top(&self) -> usize {
        self.open.len()
    }

    fn bottom(&self) -> usize {
        self.open.len() + 1
    }

    fn connect_if_open(&mut self, site: usize, neighbor: usize) -> Result<()> {
        if self.open[neighbor] {
            self.sites.union(site, neighbor)?;
            self.fullness.union(site, neighbor)?;
        }
        Ok(())
    }

    /// converts 1-indexed coordinates to a union-find label
    fn label(&self, row: usize, col: usize) -> Result<usize> {
        let n = self.side_length;
        if row == 0 || row > n || col == 0 || col > n {
            return Err(PercolationError::CoordinateOutOfRange {
                row,
                col,
                side_length: n,
            });
        }
        Ok((row - 1) * n + (col - 1))
    }
}
