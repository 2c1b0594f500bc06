//! Distance metrics between two dimension vectors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CultureMapError;
use crate::utils::{VecOps, EPSILON};

/// Metric used to turn two countries' score vectors into a cultural distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// `sqrt(sum((u - v)^2))`
    #[default]
    Euclidean,
    /// `1 - u.v / (|u| |v|)`
    Cosine,
    /// `sum(|u - v|)`
    Manhattan,
    /// Cosine distance of the mean-centred vectors
    Correlation,
}

impl DistanceMetric {
    /// Every metric, in the order offered to users.
    pub const ALL: [DistanceMetric; 4] = [
        DistanceMetric::Euclidean,
        DistanceMetric::Cosine,
        DistanceMetric::Manhattan,
        DistanceMetric::Correlation,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "Euclidean",
            DistanceMetric::Cosine => "Cosine",
            DistanceMetric::Manhattan => "Manhattan",
            DistanceMetric::Correlation => "Correlation",
        }
    }

    /// Distance between `u` and `v`.
    ///
    /// Always finite and non-negative for finite input. Identical vectors are
    /// at distance exactly 0. Where cosine or correlation are undefined (a
    /// zero or constant vector) the distance is 1 unless the vectors are equal.
    pub fn compute(&self, u: &[f64], v: &[f64]) -> f64 {
        debug_assert_eq!(u.len(), v.len());
        if u == v {
            return 0.0;
        }
        let d = match self {
            DistanceMetric::Euclidean => VecOps::squared_euclidean(u, v).sqrt(),
            DistanceMetric::Manhattan => u.iter().zip(v.iter()).map(|(a, b)| (a - b).abs()).sum(),
            DistanceMetric::Cosine => cosine_distance(u, v),
            DistanceMetric::Correlation => {
                cosine_distance(&VecOps::centered(u), &VecOps::centered(v))
            }
        };
        d.max(0.0)
    }
}

fn cosine_distance(u: &[f64], v: &[f64]) -> f64 {
    let norms = VecOps::norm(u) * VecOps::norm(v);
    if norms < EPSILON {
        return 1.0;
    }
    1.0 - VecOps::dot(u, v) / norms
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = CultureMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(DistanceMetric::Euclidean),
            "cosine" => Ok(DistanceMetric::Cosine),
            "manhattan" | "cityblock" => Ok(DistanceMetric::Manhattan),
            "correlation" => Ok(DistanceMetric::Correlation),
            _ => Err(CultureMapError::ConfigError(format!(
                "unknown distance metric '{}', expected one of: Euclidean, Cosine, Manhattan, Correlation",
                s
            ))),
        }
    }
}
