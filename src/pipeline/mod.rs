//! Culture map pipeline
//!
//! [`CultureMap`] ties the stages together for callers such as a dashboard:
//! dimension extraction, memoized distance computation and normalisation,
//! 2D embedding and heatmap cluster ordering.
//!
//! ```
//! use culture_map::prelude::*;
//!
//! let countries = vec![
//!     CountryRecord::new("A", [100.0, 0.0, 50.0, 50.0, 50.0, 50.0, 50.0]),
//!     CountryRecord::new("B", [0.0, 100.0, 50.0, 50.0, 50.0, 50.0, 50.0]),
//! ];
//!
//! let map = CultureMap::default();
//! let distances = map.distances(&countries, DistanceMetric::Manhattan).unwrap();
//! assert_eq!(distances.max_distance, 200.0);
//!
//! let normalised = map.normalised_distances(&countries, DistanceMetric::Manhattan).unwrap();
//! assert_eq!(normalised.get(0, 1), 100.0);
//! ```

mod config;

pub use config::PipelineConfig;

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::cache::{CacheStats, LruCache};
use crate::cluster::cluster_order;
use crate::country::CountryRecord;
use crate::dimensions::{extract, DimensionTable};
use crate::distance::{normalise, pairwise, DistanceKey, DistanceMatrix, DistanceMetric};
use crate::embedding::{Embedder, Embedding, EmbeddingAlgorithm};
use crate::error::Result;

/// Raw distance matrix and its largest entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distances {
    pub matrix: DistanceMatrix,
    pub max_distance: f64,
}

/// Statistics for both memoization layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipelineCacheStats {
    pub distances: CacheStats,
    pub normalised: CacheStats,
}

/// Every pipeline output for one selection
#[derive(Debug, Clone, Serialize)]
pub struct CultureReport {
    pub metric: DistanceMetric,
    pub algorithm: EmbeddingAlgorithm,
    pub dimensions: DimensionTable,
    pub distances: DistanceMatrix,
    pub max_distance: f64,
    pub normalised_distances: DistanceMatrix,
    pub embedding: Embedding,
    /// Dendrogram leaf order of the normalised matrix, for heatmaps
    pub cluster_order: Vec<usize>,
}

/// Entry point for computing cultural distances and maps.
///
/// Safe to share between threads; each memoization layer is an independent
/// bounded LRU keyed by the full selection and metric.
pub struct CultureMap {
    config: PipelineConfig,
    embedder: Embedder,
    distance_cache: LruCache<DistanceKey, Arc<Distances>>,
    normalised_cache: LruCache<DistanceKey, Arc<DistanceMatrix>>,
}

impl Default for CultureMap {
    fn default() -> Self {
        Self::build(PipelineConfig::default())
    }
}

impl CultureMap {
    /// Create a pipeline after validating `config`.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PipelineConfig) -> Self {
        let ttl = config.cache_ttl();
        Self {
            embedder: Embedder::new(config.embedding.clone()),
            distance_cache: LruCache::new(config.cache_capacity, ttl),
            normalised_cache: LruCache::new(config.cache_capacity, ttl),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Dimension table for `countries`, rows in input order.
    pub fn dimensions(&self, countries: &[CountryRecord]) -> Result<DimensionTable> {
        extract(countries)
    }

    /// Raw pairwise distances, memoized per (selection, metric).
    pub fn distances(&self, countries: &[CountryRecord], metric: DistanceMetric) -> Result<Arc<Distances>> {
        let key = DistanceKey::new(countries, metric);
        if let Some(cached) = self.distance_cache.get(&key) {
            debug!(n_countries = key.len(), metric = %key.metric(), "Distance cache hit");
            return Ok(cached);
        }

        let (matrix, max_distance) = pairwise(countries, metric)?;
        let result = Arc::new(Distances { matrix, max_distance });
        self.distance_cache.insert(key, Arc::clone(&result));
        Ok(result)
    }

    /// Distances rescaled to 0-100, memoized alongside the raw matrix.
    pub fn normalised_distances(
        &self,
        countries: &[CountryRecord],
        metric: DistanceMetric,
    ) -> Result<Arc<DistanceMatrix>> {
        let key = DistanceKey::new(countries, metric);
        if let Some(cached) = self.normalised_cache.get(&key) {
            debug!(n_countries = key.len(), metric = %key.metric(), "Normalised distance cache hit");
            return Ok(cached);
        }

        let raw = self.distances(countries, metric)?;
        let result = Arc::new(normalise(&raw.matrix, raw.max_distance)?);
        self.normalised_cache.insert(key, Arc::clone(&result));
        Ok(result)
    }

    /// 2D coordinates for `countries` with `algorithm`.
    pub fn embedding(&self, countries: &[CountryRecord], algorithm: EmbeddingAlgorithm) -> Result<Embedding> {
        let dimensions = extract(countries)?;
        self.embedder.embed(&dimensions, algorithm)
    }

    /// Run every stage for one selection.
    pub fn report(
        &self,
        countries: &[CountryRecord],
        metric: DistanceMetric,
        algorithm: EmbeddingAlgorithm,
    ) -> Result<CultureReport> {
        let dimensions = extract(countries)?;
        let raw = self.distances(countries, metric)?;
        let normalised = self.normalised_distances(countries, metric)?;
        let embedding = self.embedder.embed(&dimensions, algorithm)?;
        let order = cluster_order(&normalised)?;

        Ok(CultureReport {
            metric,
            algorithm,
            dimensions,
            distances: raw.matrix.clone(),
            max_distance: raw.max_distance,
            normalised_distances: (*normalised).clone(),
            embedding,
            cluster_order: order,
        })
    }

    /// [`Self::report`] with the configured default metric and algorithm.
    pub fn default_report(&self, countries: &[CountryRecord]) -> Result<CultureReport> {
        self.report(countries, self.config.default_metric, self.config.default_algorithm)
    }

    pub fn cache_stats(&self) -> PipelineCacheStats {
        PipelineCacheStats {
            distances: self.distance_cache.stats(),
            normalised: self.normalised_cache.stats(),
        }
    }

    /// Drop all memoized results
    pub fn clear_cache(&self) {
        self.distance_cache.clear();
        self.normalised_cache.clear();
    }
}
