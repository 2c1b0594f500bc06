//! Small dense linear algebra helpers shared by the distance engine and the
//! embedding algorithms.
//!
//! Vectors here are short (one entry per Hofstede dimension, or one per
//! selected country), so plain scalar loops are used throughout.

use ndarray::{Array1, Array2};

use crate::error::{CultureMapError, Result};

/// Floor below which a norm or variance is treated as zero.
pub const EPSILON: f64 = 1e-12;

/// Vector operations on `f64` slices
pub struct VecOps;

impl VecOps {
    /// Dot product. Slices must have equal length.
    pub fn dot(a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }

    /// Euclidean norm
    pub fn norm(a: &[f64]) -> f64 {
        Self::dot(a, a).sqrt()
    }

    /// Arithmetic mean, 0 for an empty slice
    pub fn mean(data: &[f64]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        data.iter().sum::<f64>() / data.len() as f64
    }

    /// Population variance, 0 for fewer than two values
    pub fn variance(data: &[f64]) -> f64 {
        if data.len() < 2 {
            return 0.0;
        }
        let mean = Self::mean(data);
        data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / data.len() as f64
    }

    /// Squared Euclidean distance
    pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
    }

    /// Subtract the mean from every element
    pub fn centered(a: &[f64]) -> Vec<f64> {
        let mean = Self::mean(a);
        a.iter().map(|&x| x - mean).collect()
    }
}

/// Settings for [`symmetric_eigen`] and [`top_eigenpairs`].
#[derive(Debug, Clone, Copy)]
pub struct JacobiSettings {
    /// Cap on full sweeps over the off-diagonal entries
    pub max_sweeps: usize,
    /// Converged once the off-diagonal Frobenius norm is below
    /// `tolerance` times the norm of the whole matrix
    pub tolerance: f64,
}

impl Default for JacobiSettings {
    fn default() -> Self {
        Self {
            max_sweeps: 100,
            tolerance: 1e-12,
        }
    }
}

/// Frobenius norm of the strictly off-diagonal part
fn off_diagonal_norm(a: &Array2<f64>) -> f64 {
    let n = a.nrows();
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                sum += a[[i, j]] * a[[i, j]];
            }
        }
    }
    sum.sqrt()
}

/// All eigenpairs of a symmetric matrix by the cyclic Jacobi method, sorted
/// by descending eigenvalue.
///
/// The result does not depend on any start vector, so repeated calls and
/// nearly equal eigenvalues give the same decomposition. Fails with
/// [`CultureMapError::ComputationError`] when `max_sweeps` pass without
/// convergence or the matrix holds non-finite values.
pub fn symmetric_eigen(
    matrix: &Array2<f64>,
    settings: JacobiSettings,
) -> Result<(Vec<f64>, Vec<Array1<f64>>)> {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return Err(CultureMapError::ShapeError {
            expected: format!("square matrix, {} columns", n),
            actual: format!("{} columns", matrix.ncols()),
        });
    }

    let mut a = matrix.clone();
    let mut v = Array2::<f64>::eye(n);
    let threshold = settings.tolerance * a.iter().map(|x| x * x).sum::<f64>().sqrt();

    let mut sweeps = 0;
    let mut off = off_diagonal_norm(&a);
    while !(off <= threshold) {
        if sweeps == settings.max_sweeps || !off.is_finite() {
            return Err(CultureMapError::ComputationError(format!(
                "eigen decomposition did not converge after {} sweeps (off-diagonal norm {:e})",
                sweeps, off
            )));
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq == 0.0 {
                    continue;
                }

                // Rotation angle that zeroes a[p][q]
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let (akp, akq) = (a[[k, p]], a[[k, q]]);
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[[p, k]], a[[q, k]]);
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                a[[p, q]] = 0.0;
                a[[q, p]] = 0.0;

                for k in 0..n {
                    let (vkp, vkq) = (v[[k, p]], v[[k, q]]);
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }

        sweeps += 1;
        off = off_diagonal_norm(&a);
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| a[[j, j]].total_cmp(&a[[i, i]]).then(i.cmp(&j)));

    let eigenvalues = order.iter().map(|&i| a[[i, i]]).collect();
    let eigenvectors = order.iter().map(|&i| v.column(i).to_owned()).collect();
    Ok((eigenvalues, eigenvectors))
}

/// Top-`k` eigenpairs of a symmetric positive semi-definite matrix.
///
/// Eigenvalues are clamped at zero. Each eigenvector is sign-normalised so its
/// largest-magnitude component is positive, which keeps layouts stable.
pub fn top_eigenpairs(
    matrix: &Array2<f64>,
    k: usize,
    settings: JacobiSettings,
) -> Result<(Vec<f64>, Vec<Array1<f64>>)> {
    let (mut eigenvalues, mut eigenvectors) = symmetric_eigen(matrix, settings)?;
    eigenvalues.truncate(k);
    eigenvectors.truncate(k);

    for value in eigenvalues.iter_mut() {
        *value = value.max(0.0);
    }
    for vector in eigenvectors.iter_mut() {
        orient(vector);
    }
    Ok((eigenvalues, eigenvectors))
}

/// Flip `v` so that its largest-magnitude component is positive.
fn orient(v: &mut Array1<f64>) {
    let pivot = v
        .iter()
        .copied()
        .fold(0.0f64, |best, x| if x.abs() > best.abs() { x } else { best });
    if pivot < 0.0 {
        v.mapv_inplace(|x| -x);
    }
}
