//! Memoization key for distance requests

use super::DistanceMetric;
use crate::country::{CountryRecord, Dimension};

/// Identity of a `pairwise` request.
///
/// Captures every title and the exact bit pattern of every score, in input
/// order, so an edited score or a reordered selection produces a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistanceKey {
    countries: Vec<(String, [u64; Dimension::COUNT])>,
    metric: DistanceMetric,
}

impl DistanceKey {
    pub fn new(countries: &[CountryRecord], metric: DistanceMetric) -> Self {
        let countries = countries
            .iter()
            .map(|c| (c.title.clone(), c.scores().map(f64::to_bits)))
            .collect();
        Self { countries, metric }
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Number of countries in the request
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
