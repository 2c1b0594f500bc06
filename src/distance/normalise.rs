//! Rescaling distance matrices to the 0-100 range

use super::DistanceMatrix;
use crate::error::{CultureMapError, Result};

/// Value the largest distance maps to after normalisation.
pub const TO_PERCENT: f64 = 100.0;

/// Scale every entry of `distances` by `100 / max_distance`.
///
/// A zero `max_distance` (identical or single-country selections) returns the
/// matrix unchanged instead of dividing by zero. A negative or non-finite
/// maximum is rejected.
pub fn normalise(distances: &DistanceMatrix, max_distance: f64) -> Result<DistanceMatrix> {
    if !max_distance.is_finite() || max_distance < 0.0 {
        return Err(CultureMapError::InvalidInput(format!(
            "normalisation maximum must be finite and non-negative, got {}",
            max_distance
        )));
    }

    if max_distance == 0.0 {
        tracing::debug!(n_countries = distances.len(), "Zero maximum distance, skipping normalisation");
        return Ok(distances.clone());
    }

    let scale = TO_PERCENT / max_distance;
    let values = distances.values().mapv(|x| x * scale);
    DistanceMatrix::new(distances.index().to_vec(), values)
}
