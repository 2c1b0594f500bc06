//! Classical (Torgerson) multidimensional scaling
//!
//! Places points in 2D so their Euclidean distances approximate the
//! distances between the original score vectors: double-centre the squared
//! distance matrix, then take the top two eigenpairs from a Jacobi
//! decomposition. Equal leading eigenvalues (points spread evenly around a
//! circle, say) still give one fixed layout.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{CultureMapError, Result};
use crate::utils::{top_eigenpairs, JacobiSettings, VecOps};

/// MDS configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdsConfig {
    /// Cap on Jacobi sweeps before giving up
    pub max_sweeps: usize,
    /// Relative off-diagonal norm at which the decomposition has converged
    pub tolerance: f64,
}

impl Default for MdsConfig {
    fn default() -> Self {
        Self {
            max_sweeps: 100,
            tolerance: 1e-12,
        }
    }
}

/// Classical MDS
pub struct Mds {
    config: MdsConfig,
}

impl Mds {
    pub fn new(config: MdsConfig) -> Self {
        Self { config }
    }

    /// Embed `data` (one row per sample) in 2D.
    pub fn fit_transform(&self, data: &[Vec<f64>]) -> Result<Vec<[f64; 2]>> {
        let n = data.len();
        if n < 2 {
            return Err(CultureMapError::InvalidInput(
                "MDS requires at least 2 samples".to_string(),
            ));
        }

        let gram = double_centered(data);
        let settings = JacobiSettings {
            max_sweeps: self.config.max_sweeps,
            tolerance: self.config.tolerance,
        };
        let (eigenvalues, eigenvectors) = top_eigenpairs(&gram, 2, settings)?;

        let mut embedding = vec![[0.0f64; 2]; n];
        for (c, (value, vector)) in eigenvalues.iter().zip(eigenvectors.iter()).enumerate() {
            let scale = value.sqrt();
            for (i, point) in embedding.iter_mut().enumerate() {
                point[c] = vector[i] * scale;
            }
        }
        Ok(embedding)
    }
}

/// `B = -1/2 * J D^2 J` where `D^2` holds squared Euclidean distances and
/// `J` is the centring matrix.
fn double_centered(data: &[Vec<f64>]) -> Array2<f64> {
    let n = data.len();
    let sq = Array2::from_shape_fn((n, n), |(i, j)| VecOps::squared_euclidean(&data[i], &data[j]));

    let row_means: Vec<f64> = sq.outer_iter().map(|r| r.sum() / n as f64).collect();
    let grand_mean = row_means.iter().sum::<f64>() / n as f64;

    // D^2 is symmetric, so column means equal row means
    Array2::from_shape_fn((n, n), |(i, j)| {
        -0.5 * (sq[[i, j]] - row_means[i] - row_means[j] + grand_mean)
    })
}
