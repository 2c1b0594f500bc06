//! Cultural distance computation
//!
//! - [`pairwise`] builds the symmetric country x country matrix for a metric
//!   and reports its maximum.
//! - [`normalise`] rescales a matrix so that maximum becomes 100.
//! - [`DistanceKey`] identifies a (country set, metric) request for memoization.

mod engine;
mod key;
mod matrix;
mod metric;
mod normalise;

pub use engine::pairwise;
pub use key::DistanceKey;
pub use matrix::DistanceMatrix;
pub use metric::DistanceMetric;
pub use normalise::{normalise, TO_PERCENT};
