//! Pairwise distance engine

use ndarray::Array2;

use super::{DistanceMatrix, DistanceMetric};
use crate::country::CountryRecord;
use crate::error::Result;

/// Full pairwise distance matrix for `countries` under `metric`, together
/// with its largest entry.
///
/// Negative scores are floored at zero before comparison. The upper triangle
/// is computed and mirrored, so the result is exactly symmetric with a zero
/// diagonal. Empty and single-country input yield a 0x0 or 1x1 matrix with a
/// maximum of 0.
pub fn pairwise(countries: &[CountryRecord], metric: DistanceMetric) -> Result<(DistanceMatrix, f64)> {
    for country in countries {
        country.validate()?;
    }

    let vectors: Vec<_> = countries.iter().map(|c| c.clamped_scores()).collect();
    let n = vectors.len();
    let mut values = Array2::<f64>::zeros((n, n));
    let mut max_distance = 0.0f64;

    for i in 0..n {
        for j in (i + 1)..n {
            let d = metric.compute(&vectors[i], &vectors[j]);
            values[[i, j]] = d;
            values[[j, i]] = d;
            max_distance = max_distance.max(d);
        }
    }

    let index = countries.iter().map(|c| c.title.clone()).collect();
    let matrix = DistanceMatrix::new(index, values)?;

    tracing::debug!(
        n_countries = n,
        metric = %metric,
        max_distance,
        "Computed pairwise distances"
    );
    Ok((matrix, max_distance))
}
