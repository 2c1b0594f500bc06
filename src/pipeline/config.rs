//! Pipeline configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::distance::DistanceMetric;
use crate::embedding::{EmbeddingAlgorithm, EmbeddingConfig};
use crate::error::{CultureMapError, Result};

/// Configuration for [`super::CultureMap`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum number of memoized distance results
    pub cache_capacity: usize,

    /// Seconds a memoized result stays valid; `None` keeps it until evicted
    pub cache_ttl_secs: Option<u64>,

    /// Metric used when the caller does not pick one
    pub default_metric: DistanceMetric,

    /// Algorithm used when the caller does not pick one
    pub default_algorithm: EmbeddingAlgorithm,

    /// Embedding algorithm settings
    pub embedding: EmbeddingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 64,
            cache_ttl_secs: None,
            default_metric: DistanceMetric::Euclidean,
            default_algorithm: EmbeddingAlgorithm::Pca,
            embedding: EmbeddingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file; missing keys take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            CultureMapError::ConfigError(format!(
                "invalid configuration in {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_cache_ttl(mut self, ttl_secs: Option<u64>) -> Self {
        self.cache_ttl_secs = ttl_secs;
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.default_metric = metric;
        self
    }

    pub fn with_algorithm(mut self, algorithm: EmbeddingAlgorithm) -> Self {
        self.default_algorithm = algorithm;
        self
    }

    pub fn with_embedding(mut self, embedding: EmbeddingConfig) -> Self {
        self.embedding = embedding;
        self
    }

    /// Seed for the embedding algorithms
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.embedding.random_state = seed;
        self
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(CultureMapError::ConfigError(
                "cache_capacity must be positive".to_string(),
            ));
        }
        if self.cache_ttl_secs == Some(0) {
            return Err(CultureMapError::ConfigError(
                "cache_ttl_secs must be positive when set".to_string(),
            ));
        }
        self.embedding.validate()
    }
}
