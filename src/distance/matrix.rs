//! Square distance matrix indexed by country title

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{CultureMapError, Result};

/// Pairwise distances between countries.
///
/// Built once and never mutated; both axes share the same `index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    index: Vec<String>,
    values: Array2<f64>,
}

impl DistanceMatrix {
    /// Wrap a square `values` matrix whose side matches `index`.
    pub fn new(index: Vec<String>, values: Array2<f64>) -> Result<Self> {
        let n = index.len();
        if values.dim() != (n, n) {
            return Err(CultureMapError::ShapeError {
                expected: format!("{} x {}", n, n),
                actual: format!("{} x {}", values.nrows(), values.ncols()),
            });
        }
        Ok(Self { index, values })
    }

    /// Country titles labelling rows and columns
    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Side length
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Entry at `(row, col)`; panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[[row, col]]
    }

    /// Distance between the first countries titled `from` and `to`.
    pub fn between(&self, from: &str, to: &str) -> Option<f64> {
        let i = self.index.iter().position(|t| t == from)?;
        let j = self.index.iter().position(|t| t == to)?;
        Some(self.values[[i, j]])
    }

    /// Largest entry, 0 for an empty matrix.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// True when `|M[i][j] - M[j][i]| <= tolerance` for every pair.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.len();
        (0..n).all(|i| (i + 1..n).all(|j| (self.values[[i, j]] - self.values[[j, i]]).abs() <= tolerance))
    }

    /// Rows as owned vectors
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.values.outer_iter().map(|r| r.to_vec()).collect()
    }

    /// Matrix with rows and columns permuted by `order`.
    ///
    /// `order` must be a permutation of `0..len()`.
    pub fn reordered(&self, order: &[usize]) -> Result<Self> {
        let n = self.len();
        let mut seen = vec![false; n];
        if order.len() != n {
            return Err(CultureMapError::InvalidInput(format!(
                "ordering has {} entries, matrix has {} rows",
                order.len(),
                n
            )));
        }
        for &i in order {
            if i >= n || seen[i] {
                return Err(CultureMapError::InvalidInput(format!(
                    "ordering is not a permutation of 0..{}",
                    n
                )));
            }
            seen[i] = true;
        }

        let values = Array2::from_shape_fn((n, n), |(i, j)| self.values[[order[i], order[j]]]);
        let index = order.iter().map(|&i| self.index[i].clone()).collect();
        Ok(Self { index, values })
    }
}
