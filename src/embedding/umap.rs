//! UMAP - Uniform Manifold Approximation and Projection
//!
//! Non-linear neighbour embedding (McInnes et al., 2018):
//! - brute-force k-nearest-neighbour graph, parallel over samples
//! - fuzzy simplicial set with a binary-searched bandwidth per point
//! - SGD layout with negative sampling
//!
//! Every random draw comes from a seeded ChaCha8 generator and edges are kept
//! in a sorted map, so identical input and seed give an identical layout.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use crate::error::{CultureMapError, Result};
use crate::utils::VecOps;

/// Minimum number of samples UMAP can build neighbourhoods from.
pub const MIN_SAMPLES: usize = 3;

/// UMAP configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UmapConfig {
    /// Number of nearest neighbors (controls local vs global structure)
    pub n_neighbors: usize,
    /// Minimum distance between points in the embedding
    pub min_dist: f64,
    /// Number of optimization epochs
    pub n_epochs: usize,
    /// SGD learning rate
    pub learning_rate: f64,
    /// Number of negative samples per positive edge
    pub negative_sample_rate: usize,
    /// Spread of the embedding
    pub spread: f64,
}

impl Default for UmapConfig {
    fn default() -> Self {
        Self {
            n_neighbors: 15,
            min_dist: 0.1,
            n_epochs: 200,
            learning_rate: 1.0,
            negative_sample_rate: 5,
            spread: 1.0,
        }
    }
}

impl UmapConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_neighbors < 2 {
            return Err(CultureMapError::ConfigError(
                "umap.n_neighbors must be at least 2".to_string(),
            ));
        }
        if self.n_epochs == 0 {
            return Err(CultureMapError::ConfigError(
                "umap.n_epochs must be positive".to_string(),
            ));
        }
        if !(self.spread > 0.0) || !(self.min_dist >= 0.0) || self.min_dist > self.spread {
            return Err(CultureMapError::ConfigError(format!(
                "umap.min_dist ({}) must lie in [0, spread ({})]",
                self.min_dist, self.spread
            )));
        }
        if !(self.learning_rate > 0.0) {
            return Err(CultureMapError::ConfigError(
                "umap.learning_rate must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// A neighbor entry; the heap keeps the farthest on top for eviction
#[derive(Clone)]
struct Neighbor {
    index: usize,
    distance: f64,
}

impl PartialEq for Neighbor {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Neighbor {}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .partial_cmp(&other.distance)
            .unwrap_or(Ordering::Equal)
            .then(self.index.cmp(&other.index))
    }
}

/// An edge in the fuzzy simplicial set
struct Edge {
    i: usize,
    j: usize,
    weight: f64,
}

/// UMAP dimensionality reduction
pub struct Umap {
    config: UmapConfig,
    random_state: u64,
}

impl Umap {
    pub fn new(config: UmapConfig) -> Self {
        Self {
            config,
            random_state: 42,
        }
    }

    /// Seed for layout initialisation and negative sampling
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Run UMAP on dense data. Returns n_samples x 2 embedding.
    pub fn fit_transform(&self, data: &[Vec<f64>]) -> Result<Vec<[f64; 2]>> {
        self.config.validate()?;
        let n = data.len();
        if n < MIN_SAMPLES {
            return Err(CultureMapError::InvalidInput(format!(
                "UMAP requires at least {} samples, got {}",
                MIN_SAMPLES, n
            )));
        }

        let k = self.config.n_neighbors.min(n - 1);
        let (knn_indices, knn_distances) = compute_knn(data, k);
        let edges = compute_fuzzy_set(&knn_indices, &knn_distances, k);
        let embedding = self.optimize_layout(n, &edges);

        if embedding.iter().flatten().any(|x| !x.is_finite()) {
            return Err(CultureMapError::ComputationError(
                "UMAP layout diverged".to_string(),
            ));
        }
        Ok(embedding)
    }

    /// SGD layout optimization with negative sampling.
    fn optimize_layout(&self, n_samples: usize, edges: &[Edge]) -> Vec<[f64; 2]> {
        let (a, b) = find_ab_params(self.config.spread, self.config.min_dist);
        let mut rng = ChaCha8Rng::seed_from_u64(self.random_state);
        let mut embedding: Vec<[f64; 2]> = (0..n_samples)
            .map(|_| [rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)])
            .collect();

        let n_epochs = self.config.n_epochs;
        let max_weight = edges.iter().map(|e| e.weight).fold(0.0_f64, f64::max);
        // Heavier edges are sampled more often; the heaviest every epoch
        let epochs_per_sample: Vec<f64> = edges.iter().map(|e| max_weight / e.weight).collect();
        let mut next_sample = epochs_per_sample.clone();

        for epoch in 0..n_epochs {
            let alpha = self.config.learning_rate * (1.0 - epoch as f64 / n_epochs as f64);
            let now = (epoch + 1) as f64;

            for (e, edge) in edges.iter().enumerate() {
                if next_sample[e] > now {
                    continue;
                }
                next_sample[e] += epochs_per_sample[e];

                let (i, j) = (edge.i, edge.j);
                let dy = [
                    embedding[i][0] - embedding[j][0],
                    embedding[i][1] - embedding[j][1],
                ];
                let dist_sq = dy[0] * dy[0] + dy[1] * dy[1];
                if dist_sq > 0.0 {
                    let coeff = -2.0 * a * b * dist_sq.powf(b - 1.0) / (1.0 + a * dist_sq.powf(b));
                    for c in 0..2 {
                        let grad = clip(coeff * dy[c]);
                        embedding[i][c] += alpha * grad;
                        embedding[j][c] -= alpha * grad;
                    }
                }

                for _ in 0..self.config.negative_sample_rate {
                    let k = rng.gen_range(0..n_samples);
                    if k == i {
                        continue;
                    }
                    let dy = [
                        embedding[i][0] - embedding[k][0],
                        embedding[i][1] - embedding[k][1],
                    ];
                    let dist_sq = dy[0] * dy[0] + dy[1] * dy[1];
                    let coeff = 2.0 * b / ((0.001 + dist_sq) * (1.0 + a * dist_sq.powf(b)));
                    for c in 0..2 {
                        embedding[i][c] += alpha * clip(coeff * dy[c]);
                    }
                }
            }
        }

        embedding
    }
}

fn clip(grad: f64) -> f64 {
    grad.clamp(-4.0, 4.0)
}

/// k nearest neighbours of every sample by brute force, nearest first.
fn compute_knn(data: &[Vec<f64>], k: usize) -> (Vec<Vec<usize>>, Vec<Vec<f64>>) {
    let n = data.len();
    (0..n)
        .into_par_iter()
        .map(|i| {
            let mut heap: BinaryHeap<Neighbor> = BinaryHeap::with_capacity(k + 1);
            for j in (0..n).filter(|&j| j != i) {
                let candidate = Neighbor {
                    index: j,
                    distance: VecOps::squared_euclidean(&data[i], &data[j]).sqrt(),
                };
                if heap.len() < k {
                    heap.push(candidate);
                } else if heap.peek().map_or(false, |top| candidate < *top) {
                    heap.pop();
                    heap.push(candidate);
                }
            }
            let neighbors = heap.into_sorted_vec();
            let indices: Vec<usize> = neighbors.iter().map(|nb| nb.index).collect();
            let distances: Vec<f64> = neighbors.iter().map(|nb| nb.distance).collect();
            (indices, distances)
        })
        .unzip()
}

/// Fuzzy simplicial set: per-point `rho` (distance to the nearest neighbour)
/// and `sigma` (bandwidth with `sum(exp(-(d - rho) / sigma)) = log2(k)`), then
/// fuzzy-union symmetrisation `w + w' - w * w'`.
fn compute_fuzzy_set(knn_indices: &[Vec<usize>], knn_distances: &[Vec<f64>], k: usize) -> Vec<Edge> {
    let target = (k as f64).log2();

    let params: Vec<(f64, f64)> = knn_distances
        .par_iter()
        .map(|dists| {
            let rho = dists.first().copied().unwrap_or(0.0);
            let mut lo = 1e-8_f64;
            let mut hi = 1e4_f64;
            let mut sigma = 1.0;
            for _ in 0..64 {
                sigma = (lo + hi) / 2.0;
                let sum: f64 = dists
                    .iter()
                    .map(|&d| (-(d - rho).max(0.0) / sigma).exp())
                    .sum();
                if (sum - target).abs() < 1e-5 {
                    break;
                }
                if sum > target {
                    hi = sigma;
                } else {
                    lo = sigma;
                }
            }
            (rho, sigma)
        })
        .collect();

    let mut directed: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for (i, (indices, dists)) in knn_indices.iter().zip(knn_distances).enumerate() {
        let (rho, sigma) = params[i];
        for (&j, &d) in indices.iter().zip(dists) {
            let w = (-(d - rho).max(0.0) / sigma.max(1e-12)).exp();
            directed.insert((i, j), w);
        }
    }

    let mut symmetric: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for (&(i, j), &w_ij) in &directed {
        let w_ji = directed.get(&(j, i)).copied().unwrap_or(0.0);
        let key = if i < j { (i, j) } else { (j, i) };
        symmetric.insert(key, w_ij + w_ji - w_ij * w_ji);
    }

    symmetric
        .into_iter()
        .filter(|(_, w)| *w > 1e-8)
        .map(|((i, j), weight)| Edge { i, j, weight })
        .collect()
}

/// Fit `a`, `b` of the curve `1 / (1 + a * d^(2b))` to the target membership
/// `1` for `d < min_dist` and `exp(-(d - min_dist) / spread)` beyond, by a
/// coarse-to-fine least-squares grid search.
fn find_ab_params(spread: f64, min_dist: f64) -> (f64, f64) {
    let xs: Vec<f64> = (1..=300).map(|i| i as f64 * spread * 3.0 / 300.0).collect();
    let ys: Vec<f64> = xs
        .iter()
        .map(|&x| if x < min_dist { 1.0 } else { (-(x - min_dist) / spread).exp() })
        .collect();
    let sse = |a: f64, b: f64| -> f64 {
        xs.iter()
            .zip(&ys)
            .map(|(&x, &y)| (1.0 / (1.0 + a * x.powf(2.0 * b)) - y).powi(2))
            .sum()
    };

    // Search log(a) and b, shrinking the window around the best point
    let (mut log_a, mut b) = (0.0_f64, 1.0_f64);
    let (mut half_a, mut half_b) = (3.0_f64, 0.9_f64);
    for _ in 0..6 {
        let mut best = (f64::INFINITY, log_a, b);
        for ia in 0..=20 {
            let la = log_a - half_a + half_a * ia as f64 / 10.0;
            for ib in 0..=20 {
                let bb = (b - half_b + half_b * ib as f64 / 10.0).max(0.05);
                let err = sse(la.exp(), bb);
                if err < best.0 {
                    best = (err, la, bb);
                }
            }
        }
        log_a = best.1;
        b = best.2;
        half_a /= 5.0;
        half_b /= 5.0;
    }

    (log_a.exp(), b)
}
