//! Dimension extraction
//!
//! Projects a list of country records into a table with one row per country
//! and one column per Hofstede dimension. Scores are copied as-is; the
//! floor-at-zero clamp only applies to distance computation.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::country::{CountryRecord, Dimension};
use crate::error::{CultureMapError, Result};

/// Per-country dimension scores, rows in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionTable {
    /// Country titles, one per row
    index: Vec<String>,
    /// n_countries x 7 scores, columns in [`Dimension::ALL`] order
    values: Array2<f64>,
}

impl DimensionTable {
    /// Build a table from an index and a matching value matrix.
    pub fn new(index: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if values.nrows() != index.len() || values.ncols() != Dimension::COUNT {
            return Err(CultureMapError::ShapeError {
                expected: format!("{} x {}", index.len(), Dimension::COUNT),
                actual: format!("{} x {}", values.nrows(), values.ncols()),
            });
        }
        Ok(Self { index, values })
    }

    /// Country titles in row order
    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// Raw score matrix
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of countries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All scores for one dimension, in row order
    pub fn column(&self, dimension: Dimension) -> ArrayView1<'_, f64> {
        self.values.column(dimension.index())
    }

    /// Score vector of the country at `row`
    pub fn row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.values.row(row)
    }

    /// Rows as owned vectors, the layout the embedding algorithms consume.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.values.outer_iter().map(|r| r.to_vec()).collect()
    }

    /// `(dimension, column)` pairs in canonical order.
    pub fn columns(&self) -> impl Iterator<Item = (Dimension, ArrayView1<'_, f64>)> {
        Dimension::ALL.into_iter().map(move |d| (d, self.column(d)))
    }
}

/// Build the dimension table for `countries`, preserving their order.
///
/// Duplicate titles are kept as separate rows. A record with a non-finite
/// score is rejected.
pub fn extract(countries: &[CountryRecord]) -> Result<DimensionTable> {
    let mut values = Array2::<f64>::zeros((countries.len(), Dimension::COUNT));
    for (row, country) in countries.iter().enumerate() {
        country.validate()?;
        for dimension in Dimension::ALL {
            values[[row, dimension.index()]] = country.score(dimension);
        }
    }

    let index = countries.iter().map(|c| c.title.clone()).collect();
    tracing::debug!(n_countries = countries.len(), "Extracted dimension table");
    DimensionTable::new(index, values)
}
