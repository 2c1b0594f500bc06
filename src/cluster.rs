//! Cluster ordering for distance heatmaps.
//!
//! Average-linkage agglomerative clustering of a [`DistanceMatrix`]; the
//! dendrogram's leaf order groups culturally close countries next to each
//! other when rows and columns are permuted with
//! [`DistanceMatrix::reordered`].

use kodama::{linkage, Method};

use crate::distance::DistanceMatrix;
use crate::error::{CultureMapError, Result};

/// Leaf order of the average-linkage dendrogram over `distances`.
///
/// Returns a permutation of `0..distances.len()`. Empty input gives an empty
/// order and a single country gives `[0]`.
pub fn cluster_order(distances: &DistanceMatrix) -> Result<Vec<usize>> {
    let n = distances.len();
    if n <= 1 {
        return Ok((0..n).collect());
    }

    let mut condensed = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = distances.get(i, j);
            if !d.is_finite() {
                return Err(CultureMapError::InvalidInput(format!(
                    "non-finite distance between '{}' and '{}'",
                    distances.index()[i],
                    distances.index()[j]
                )));
            }
            condensed.push(d);
        }
    }

    let dendrogram = linkage(&mut condensed, n, Method::Average);
    let steps = dendrogram.steps();

    // Cluster ids: 0..n are leaves, n + s is the cluster formed at step s
    let mut order = Vec::with_capacity(n);
    let mut stack = vec![n + steps.len() - 1];
    while let Some(cluster) = stack.pop() {
        if cluster < n {
            order.push(cluster);
        } else {
            let step = &steps[cluster - n];
            stack.push(step.cluster2);
            stack.push(step.cluster1);
        }
    }

    tracing::debug!(n_countries = n, "Computed cluster ordering");
    Ok(order)
}
