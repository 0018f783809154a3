//! weighted quick-union with path compression over a fixed universe of labels

use crate::error::{PercolationError, Result};

pub struct DisjointSet {
    parent: Vec<usize>,
    tree_size: Vec<usize>, // only meaningful at roots
    components: usize,
}

impl DisjointSet {
    /// Create `size` singleton sets: 0, 1, …, size-1.
    pub fn new(size: usize) -> Self {
        DisjointSet {
            parent: (0..size).collect(),
            tree_size: vec![1; size],
            components: size,
        }
    }

    /// number of labels in the universe
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Find the set representative for `x`, compressing paths.
    pub fn find(&mut self, x: usize) -> Result<usize> {
        self.validate(x)?;
        Ok(self.root(x))
    }

    /// Union the sets containing `x` and `y`.
    ///
    /// The smaller tree is attached under the larger one; on a tie `y`'s root
    /// goes under `x`'s root.
    pub fn union(&mut self, x: usize, y: usize) -> Result<()> {
        let mut a = self.find(x)?;
        let mut b = self.find(y)?;
        if a == b {
            return Ok(());
        }

        if self.tree_size[a] < self.tree_size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.tree_size[a] += self.tree_size[b];
        self.components -= 1;
        Ok(())
    }

    /// Check if `x` and `y` are in the same set.
    pub fn connected(&mut self, x: usize, y: usize) -> Result<bool> {
        Ok(self.find(x)? == self.find(y)?)
    }

    /// number of disjoint components
    pub fn count(&self) -> usize {
        self.components
    }

    /// number of labels sharing a component with `x`
    pub fn component_size(&mut self, x: usize) -> Result<usize> {
        let root = self.find(x)?;
        Ok(self.tree_size[root])
    }

    fn validate(&self, x: usize) -> Result<()> {
        if x >= self.parent.len() {
            return Err(PercolationError::IndexOutOfRange {
                index: x,
                size: self.parent.len(),
            });
        }
        Ok(())
    }

    // union by size keeps trees O(log n) deep, so recursion stays shallow
    fn root(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.root(self.parent[x]);
            self.parent[x] = root;
        }
        self.parent[x]
    }
}
