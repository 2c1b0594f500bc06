//! PCA - Principal Component Analysis
//!
//! Linear projection onto the two directions of largest variance. Features
//! are centred and, by default, scaled to unit variance so dimensions with a
//! wider spread of scores do not dominate. The top eigenvectors of the
//! covariance matrix come from a Jacobi eigen decomposition, so the layout
//! is fully determined by the data.

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{CultureMapError, Result};
use crate::utils::{top_eigenpairs, JacobiSettings, VecOps, EPSILON};

/// PCA configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PcaConfig {
    /// Whether to center the data (subtract mean per feature)
    pub center: bool,
    /// Whether to scale to unit variance
    pub scale: bool,
    /// Cap on Jacobi sweeps before giving up
    pub max_sweeps: usize,
    /// Relative off-diagonal norm at which the decomposition has converged
    pub tolerance: f64,
}

impl Default for PcaConfig {
    fn default() -> Self {
        Self {
            center: true,
            scale: true,
            max_sweeps: 100,
            tolerance: 1e-12,
        }
    }
}

/// PCA result including the embedding and explained variance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcaResult {
    /// Projected data: n_samples x 2
    pub embedding: Vec<[f64; 2]>,
    /// Explained variance ratio for each component (sums to <= 1.0)
    pub explained_variance_ratio: Vec<f64>,
    /// Eigenvalues (raw variance per component)
    pub eigenvalues: Vec<f64>,
}

/// PCA dimensionality reduction
pub struct Pca {
    config: PcaConfig,
}

impl Pca {
    pub fn new(config: PcaConfig) -> Self {
        Self { config }
    }

    /// Project `data` (one row per sample) onto its first two principal components.
    pub fn fit_transform(&self, data: &[Vec<f64>]) -> Result<PcaResult> {
        let n = data.len();
        if n < 2 {
            return Err(CultureMapError::InvalidInput(
                "PCA requires at least 2 samples".to_string(),
            ));
        }

        let d = data[0].len();
        if d < 1 || data.iter().any(|row| row.len() != d) {
            return Err(CultureMapError::InvalidInput(
                "PCA requires rows of equal, non-zero length".to_string(),
            ));
        }

        let n_components = 2.min(d);
        let transformed = self.center_and_scale(data, d);
        let cov = covariance(&transformed, d);

        let settings = JacobiSettings {
            max_sweeps: self.config.max_sweeps,
            tolerance: self.config.tolerance,
        };
        let (eigenvalues, eigenvectors) = top_eigenpairs(&cov, n_components, settings)?;

        let full_variance = cov.diag().sum().max(EPSILON);
        let explained_variance_ratio = eigenvalues
            .iter()
            .map(|&ev| (ev / full_variance).max(0.0))
            .collect();

        let embedding = transformed
            .par_iter()
            .map(|sample| {
                let mut point = [0.0f64; 2];
                for (c, component) in eigenvectors.iter().enumerate() {
                    point[c] = component.iter().zip(sample).map(|(w, x)| w * x).sum();
                }
                point
            })
            .collect();

        Ok(PcaResult {
            embedding,
            explained_variance_ratio,
            eigenvalues,
        })
    }

    /// Center data (subtract mean) and optionally scale to unit variance.
    fn center_and_scale(&self, data: &[Vec<f64>], d: usize) -> Vec<Vec<f64>> {
        let columns: Vec<Vec<f64>> = (0..d)
            .map(|j| data.iter().map(|row| row[j]).collect())
            .collect();

        let means: Vec<f64> = if self.config.center {
            columns.iter().map(|col| VecOps::mean(col)).collect()
        } else {
            vec![0.0; d]
        };

        // A constant column has zero spread; leave it unscaled so it stays at zero
        let stds: Vec<f64> = if self.config.scale {
            columns
                .iter()
                .map(|col| {
                    let std = VecOps::variance(col).sqrt();
                    if std < EPSILON { 1.0 } else { std }
                })
                .collect()
        } else {
            vec![1.0; d]
        };

        data.iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(j, &x)| (x - means[j]) / stds[j])
                    .collect()
            })
            .collect()
    }
}

/// Sample covariance matrix (d x d) of already-centred rows.
fn covariance(data: &[Vec<f64>], d: usize) -> Array2<f64> {
    let denom = (data.len() as f64 - 1.0).max(1.0);
    let mut cov = Array2::<f64>::zeros((d, d));
    for i in 0..d {
        for j in i..d {
            let dot: f64 = data.iter().map(|row| row[i] * row[j]).sum();
            let val = dot / denom;
            cov[[i, j]] = val;
            cov[[j, i]] = val;
        }
    }
    cov
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pca_basic() {
        // Perfectly linear data: one component carries everything
        let data = vec![
            vec![1.0, 2.0],
            vec![2.0, 4.0],
            vec![3.0, 6.0],
            vec![4.0, 8.0],
            vec![5.0, 10.0],
        ];

        let result = Pca::new(PcaConfig::default()).fit_transform(&data).unwrap();

        assert_eq!(result.embedding.len(), 5);
        assert!(
            result.explained_variance_ratio[0] > 0.95,
            "First component should explain >95% variance, got {}",
            result.explained_variance_ratio[0]
        );
    }

    #[test]
    fn test_pca_two_clusters() {
        let data = vec![
            vec![0.0, 0.0, 0.0],
            vec![0.1, 0.1, 0.0],
            vec![0.0, 0.1, 0.1],
            vec![10.0, 10.0, 10.0],
            vec![10.1, 10.0, 10.0],
            vec![10.0, 10.1, 10.0],
        ];

        let result = Pca::new(PcaConfig::default()).fit_transform(&data).unwrap();
        assert_eq!(result.explained_variance_ratio.len(), 2);

        let mean_a = result.embedding[..3].iter().map(|p| p[0]).sum::<f64>() / 3.0;
        let mean_b = result.embedding[3..].iter().map(|p| p[0]).sum::<f64>() / 3.0;
        assert!((mean_a - mean_b).abs() > 1.0, "Clusters should be separated");
    }

    #[test]
    fn test_pca_too_few_samples() {
        let data = vec![vec![1.0, 2.0]];
        assert!(Pca::new(PcaConfig::default()).fit_transform(&data).is_err());
    }

    #[test]
    fn test_pca_constant_data_collapses_to_origin() {
        let data = vec![vec![5.0, 5.0, 5.0]; 4];
        let result = Pca::new(PcaConfig::default()).fit_transform(&data).unwrap();
        for p in &result.embedding {
            assert_eq!(*p, [0.0, 0.0]);
        }
    }

    #[test]
    fn test_pca_deterministic() {
        let data = vec![
            vec![1.0, 0.0, 0.5],
            vec![0.0, 1.0, 0.3],
            vec![1.0, 1.0, 0.8],
            vec![0.5, 0.5, 0.4],
        ];
        let a = Pca::new(PcaConfig::default()).fit_transform(&data).unwrap();
        let b = Pca::new(PcaConfig::default()).fit_transform(&data).unwrap();
        assert_eq!(a.embedding, b.embedding);
    }

    #[test]
    fn test_pca_no_scale() {
        let data = vec![
            vec![1.0, 100.0],
            vec![2.0, 200.0],
            vec![3.0, 300.0],
            vec![4.0, 400.0],
        ];
        let config = PcaConfig {
            scale: false,
            ..Default::default()
        };
        let result = Pca::new(config).fit_transform(&data).unwrap();
        assert_eq!(result.embedding.len(), 4);
        let total: f64 = result.explained_variance_ratio.iter().sum();
        assert!(total > 0.99 && total <= 1.001, "sum={}", total);
    }
}
