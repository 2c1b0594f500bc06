//! Embedding module - 2D coordinates for visual clustering.
//!
//! [`embed`] turns a [`DimensionTable`] into one `(x, y)` point per country
//! with the selected [`EmbeddingAlgorithm`]. Selections too small for an
//! algorithm never reach its numeric code:
//!
//! | rows | result |
//! |------|--------|
//! | 0 | empty embedding |
//! | 1 | the origin |
//! | 2, or fewer than UMAP needs | both points on the x axis at `±d/2` |
//!
//! PCA and MDS are deterministic. UMAP draws every random number from a
//! generator seeded with [`EmbeddingConfig::random_state`].

pub mod mds;
pub mod pca;
pub mod umap;

pub use mds::{Mds, MdsConfig};
pub use pca::{Pca, PcaConfig, PcaResult};
pub use umap::{Umap, UmapConfig};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::dimensions::DimensionTable;
use crate::error::{CultureMapError, Result};
use crate::utils::VecOps;

/// Dimensionality reduction technique used for the 2D map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmbeddingAlgorithm {
    /// Principal component analysis
    #[default]
    Pca,
    /// Classical multidimensional scaling
    Mds,
    /// Uniform manifold approximation and projection
    Umap,
}

impl EmbeddingAlgorithm {
    pub const ALL: [EmbeddingAlgorithm; 3] = [
        EmbeddingAlgorithm::Pca,
        EmbeddingAlgorithm::Mds,
        EmbeddingAlgorithm::Umap,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EmbeddingAlgorithm::Pca => "PCA",
            EmbeddingAlgorithm::Mds => "MDS",
            EmbeddingAlgorithm::Umap => "UMAP",
        }
    }

    /// Fewest rows the algorithm itself runs on; smaller inputs use the
    /// trivial layout.
    pub fn min_samples(&self) -> usize {
        match self {
            EmbeddingAlgorithm::Pca | EmbeddingAlgorithm::Mds => 3,
            EmbeddingAlgorithm::Umap => umap::MIN_SAMPLES,
        }
    }
}

impl fmt::Display for EmbeddingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EmbeddingAlgorithm {
    type Err = CultureMapError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pca" => Ok(EmbeddingAlgorithm::Pca),
            "mds" => Ok(EmbeddingAlgorithm::Mds),
            "umap" => Ok(EmbeddingAlgorithm::Umap),
            _ => Err(CultureMapError::ConfigError(format!(
                "unknown embedding algorithm '{}', expected one of: PCA, MDS, UMAP",
                s
            ))),
        }
    }
}

/// Settings for every embedding algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Seed for UMAP initialisation and negative sampling
    pub random_state: u64,
    pub pca: PcaConfig,
    pub mds: MdsConfig,
    pub umap: UmapConfig,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            random_state: 42,
            pca: PcaConfig::default(),
            mds: MdsConfig::default(),
            umap: UmapConfig::default(),
        }
    }
}

impl EmbeddingConfig {
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    pub fn with_umap(mut self, umap: UmapConfig) -> Self {
        self.umap = umap;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.umap.validate()
    }
}

/// Two coordinates per country, rows in dimension-table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    index: Vec<String>,
    coords: Vec<[f64; 2]>,
}

impl Embedding {
    pub fn new(index: Vec<String>, coords: Vec<[f64; 2]>) -> Result<Self> {
        if index.len() != coords.len() {
            return Err(CultureMapError::ShapeError {
                expected: format!("{} rows", index.len()),
                actual: format!("{} rows", coords.len()),
            });
        }
        Ok(Self { index, coords })
    }

    /// Country titles in row order
    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn coords(&self) -> &[[f64; 2]] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Always 2
    pub fn n_columns(&self) -> usize {
        2
    }

    pub fn x(&self) -> Vec<f64> {
        self.coords.iter().map(|p| p[0]).collect()
    }

    pub fn y(&self) -> Vec<f64> {
        self.coords.iter().map(|p| p[1]).collect()
    }

    /// `(title, [x, y])` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, [f64; 2])> {
        self.index.iter().map(String::as_str).zip(self.coords.iter().copied())
    }
}

/// Runs the configured dimensionality reduction
#[derive(Debug, Clone, Default)]
pub struct Embedder {
    config: EmbeddingConfig,
}

impl Embedder {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    /// Embed every row of `dimensions` in 2D with `algorithm`.
    pub fn embed(&self, dimensions: &DimensionTable, algorithm: EmbeddingAlgorithm) -> Result<Embedding> {
        self.config.validate()?;
        let data = dimensions.rows();
        let n = data.len();

        let coords = if n < algorithm.min_samples() {
            if n > 0 {
                warn!(
                    algorithm = %algorithm,
                    n_countries = n,
                    "Too few countries for the algorithm, using trivial layout"
                );
            }
            trivial_layout(&data)
        } else {
            match algorithm {
                EmbeddingAlgorithm::Pca => Pca::new(self.config.pca.clone()).fit_transform(&data)?.embedding,
                EmbeddingAlgorithm::Mds => Mds::new(self.config.mds.clone()).fit_transform(&data)?,
                EmbeddingAlgorithm::Umap => Umap::new(self.config.umap.clone())
                    .with_random_state(self.config.random_state)
                    .fit_transform(&data)?,
            }
        };

        debug!(algorithm = %algorithm, n_countries = n, "Computed 2D embedding");
        Embedding::new(dimensions.index().to_vec(), coords)
    }
}

/// Embed `dimensions` with the default configuration.
pub fn embed(dimensions: &DimensionTable, algorithm: EmbeddingAlgorithm) -> Result<Embedding> {
    Embedder::default().embed(dimensions, algorithm)
}

/// Layout for selections below an algorithm's minimum: nothing, the origin,
/// or two points on the x axis separated by their Euclidean distance.
fn trivial_layout(data: &[Vec<f64>]) -> Vec<[f64; 2]> {
    match data {
        [] => Vec::new(),
        [_] => vec![[0.0, 0.0]],
        [a, b] => {
            let half = VecOps::squared_euclidean(a, b).sqrt() / 2.0;
            vec![[-half, 0.0], [half, 0.0]]
        }
        _ => vec![[0.0, 0.0]; data.len()],
    }
}
