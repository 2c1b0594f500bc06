//! Culture Map - cultural distance between countries
//!
//! This crate turns per-country Hofstede dimension scores into material for
//! exploring cultural similarity:
//! - a dimension table for display
//! - a symmetric distance matrix under a selectable metric, plus its maximum
//! - the same matrix rescaled to 0-100
//! - a 2D embedding from a selectable dimensionality reduction
//! - a dendrogram ordering for clustered heatmaps
//!
//! # Modules
//!
//! - [`country`] - Country records and the dimension set
//! - [`dimensions`] - Dimension extraction
//! - [`distance`] - Metrics, pairwise matrices and normalisation
//! - [`embedding`] - PCA, MDS and UMAP projections to 2D
//! - [`cluster`] - Heatmap cluster ordering
//! - [`cache`] - Bounded LRU memoization
//! - [`pipeline`] - The [`CultureMap`] facade and its configuration
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Data model
pub mod country;
pub mod dimensions;

// Numeric pipeline
pub mod distance;
pub mod embedding;
pub mod cluster;

// Infrastructure
pub mod cache;
pub mod pipeline;
pub mod utils;

// Services
pub mod cli;

pub use error::{CultureMapError, Result};
pub use pipeline::{CultureMap, PipelineConfig};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{CultureMapError, Result};

    // Data model
    pub use crate::country::{load_countries, parse_countries, CountryRecord, Dimension};
    pub use crate::dimensions::{extract, DimensionTable};

    // Distances
    pub use crate::distance::{normalise, pairwise, DistanceMatrix, DistanceMetric, TO_PERCENT};

    // Embedding
    pub use crate::embedding::{embed, Embedder, Embedding, EmbeddingAlgorithm, EmbeddingConfig};

    // Clustering
    pub use crate::cluster::cluster_order;

    // Pipeline
    pub use crate::pipeline::{CultureMap, CultureReport, Distances, PipelineConfig};
}
